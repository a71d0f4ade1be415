use std::collections::VecDeque;

use rand::Rng;

use crate::engine::catalog::Symbol;
use crate::engine::selector::DrawContext;

/// Pre-drawn upcoming symbols. What the learner sees is exactly the pop
/// order; each refill excludes the queue tail and the symbol on screen.
#[derive(Clone, Debug)]
pub struct LookaheadQueue {
    items: VecDeque<Symbol>,
    capacity: usize,
}

impl LookaheadQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Top up to capacity.
    pub fn fill<R: Rng + ?Sized>(
        &mut self,
        current: Option<Symbol>,
        ctx: &DrawContext<'_>,
        rng: &mut R,
    ) {
        while self.items.len() < self.capacity {
            let mut exclude = Vec::with_capacity(2);
            if let Some(tail) = self.items.back() {
                exclude.push(tail.glyph);
            }
            if let Some(cur) = current {
                exclude.push(cur.glyph);
            }
            match ctx.select_next(&exclude, rng) {
                Some(next) => self.items.push_back(next),
                None => break,
            }
        }
    }

    /// Pop the next symbol to present and refill behind it.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        ctx: &DrawContext<'_>,
        rng: &mut R,
    ) -> Option<Symbol> {
        if self.items.is_empty() {
            self.fill(None, ctx, rng);
        }
        let next = self.items.pop_front()?;
        self.fill(Some(next), ctx, rng);
        Some(next)
    }

    pub fn peek(&self, n: usize) -> Vec<Symbol> {
        self.items.iter().take(n).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::engine::catalog::HANGUL_JAMO;
    use crate::engine::mastery::MasteryRecord;
    use crate::engine::selector::FocusMode;

    #[test]
    fn test_fill_reaches_capacity() {
        let mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let ctx = DrawContext::new(&HANGUL_JAMO[..3], &mastery, FocusMode::All);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut queue = LookaheadQueue::new(3);
        queue.fill(None, &ctx, &mut rng);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        assert_eq!(LookaheadQueue::new(0).capacity(), 1);
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let ctx = DrawContext::new(&HANGUL_JAMO[..5], &mastery, FocusMode::All);
        let mut rng = SmallRng::seed_from_u64(11);
        let mut queue = LookaheadQueue::new(3);
        queue.fill(None, &ctx, &mut rng);
        let first = queue.peek(2);
        assert_eq!(first.len(), 2);
        assert_eq!(queue.peek(2), first);
        assert_eq!(queue.peek(10).len(), 3);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_presented_sequence_matches_preview() {
        let mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let ctx = DrawContext::new(&HANGUL_JAMO[..6], &mastery, FocusMode::All);
        let mut rng = SmallRng::seed_from_u64(21);
        let mut queue = LookaheadQueue::new(3);
        queue.fill(None, &ctx, &mut rng);

        for _ in 0..50 {
            let previewed = queue.peek(3);
            let popped = queue.advance(&ctx, &mut rng).unwrap();
            assert_eq!(popped, previewed[0]);
            // the rest of the preview shifts forward untouched
            assert_eq!(queue.peek(2), previewed[1..].to_vec());
        }
    }

    #[test]
    fn test_no_back_to_back_repeats() {
        let mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let ctx = DrawContext::new(&HANGUL_JAMO[..3], &mastery, FocusMode::All);
        let mut rng = SmallRng::seed_from_u64(77);
        let mut queue = LookaheadQueue::new(2);
        queue.fill(None, &ctx, &mut rng);

        let mut prev = queue.advance(&ctx, &mut rng).unwrap();
        for _ in 0..200 {
            let next = queue.advance(&ctx, &mut rng).unwrap();
            assert_ne!(next.glyph, prev.glyph);
            prev = next;
        }
    }

    #[test]
    fn test_single_candidate_repeats() {
        let mastery = MasteryRecord::default();
        let ctx = DrawContext::new(&HANGUL_JAMO[..1], &mastery, FocusMode::All);
        let mut rng = SmallRng::seed_from_u64(2);
        let mut queue = LookaheadQueue::new(3);
        queue.fill(None, &ctx, &mut rng);
        for _ in 0..5 {
            assert_eq!(queue.advance(&ctx, &mut rng).unwrap().glyph, 'ㄱ');
        }
    }

    #[test]
    fn test_advance_on_empty_queue_fills_first() {
        let mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let ctx = DrawContext::new(&HANGUL_JAMO[..3], &mastery, FocusMode::All);
        let mut rng = SmallRng::seed_from_u64(8);
        let mut queue = LookaheadQueue::new(2);
        assert!(queue.advance(&ctx, &mut rng).is_some());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_empty_context_yields_nothing() {
        let mastery = MasteryRecord::default();
        let ctx = DrawContext::new(&[], &mastery, FocusMode::All);
        let mut rng = SmallRng::seed_from_u64(8);
        let mut queue = LookaheadQueue::new(2);
        assert!(queue.advance(&ctx, &mut rng).is_none());
        assert!(queue.is_empty());
    }
}
