use std::collections::VecDeque;

use crate::engine::catalog::Symbol;

/// Bounded record of recently answered symbols, newest first.
#[derive(Clone, Debug)]
pub struct RecentHistory {
    items: VecDeque<Symbol>,
    capacity: usize,
}

impl RecentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.items.push_front(symbol);
        self.items.truncate(self.capacity);
    }

    pub fn recent(&self, n: usize) -> Vec<Symbol> {
        self.items.iter().take(n).copied().collect()
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
}
