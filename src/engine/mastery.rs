use std::collections::BTreeMap;

use crate::engine::catalog::Symbol;

/// Per-symbol mastery ceiling. A symbol at this score is never drawn while
/// unmastered symbols remain.
pub const MAX_SCORE: u8 = 5;

/// Score at which a symbol counts toward widening the unlock frontier.
pub const UNLOCK_THRESHOLD: u8 = 3;

/// Glyph -> score in `0..=MAX_SCORE`. Glyphs with no entry score 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MasteryRecord {
    scores: BTreeMap<char, u8>,
}

impl MasteryRecord {
    /// Every catalog symbol present with score 0.
    pub fn fresh(catalog: &[Symbol]) -> Self {
        Self {
            scores: catalog.iter().map(|s| (s.glyph, 0)).collect(),
        }
    }

    pub fn score(&self, glyph: char) -> u8 {
        self.scores.get(&glyph).copied().unwrap_or(0)
    }

    /// Set a score from untrusted input, clamping into range.
    pub fn set_score(&mut self, glyph: char, raw: i64) {
        self.scores.insert(glyph, clamp_score(raw));
    }

    /// Apply `delta` and clamp. Returns the new score.
    pub fn adjust_score(&mut self, glyph: char, delta: i32) -> u8 {
        let next = clamp_score(self.score(glyph) as i64 + delta as i64);
        self.scores.insert(glyph, next);
        next
    }

    pub fn is_mastered(&self, glyph: char) -> bool {
        self.score(glyph) >= MAX_SCORE
    }

    pub fn count_at_least(&self, catalog: &[Symbol], threshold: u8) -> usize {
        catalog
            .iter()
            .filter(|s| self.score(s.glyph) >= threshold)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        self.scores.iter().map(|(&g, &s)| (g, s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, MAX_SCORE as i64) as u8
}
