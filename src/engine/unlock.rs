use crate::engine::catalog::Symbol;
use crate::engine::mastery::{MasteryRecord, UNLOCK_THRESHOLD};

pub const MIN_UNLOCKED: usize = 3;

/// Number of catalog symbols open for practice: three to start, plus one per
/// symbol at or above the unlock threshold, capped at the catalog size.
pub fn unlocked_count(mastery: &MasteryRecord, catalog: &[Symbol]) -> usize {
    let mastered = mastery.count_at_least(catalog, UNLOCK_THRESHOLD);
    MIN_UNLOCKED.max(mastered + MIN_UNLOCKED).min(catalog.len())
}

/// The unlocked set is a catalog-order prefix, never stored.
pub fn compute_unlocked<'a>(mastery: &MasteryRecord, catalog: &'a [Symbol]) -> &'a [Symbol] {
    &catalog[..unlocked_count(mastery, catalog)]
}
