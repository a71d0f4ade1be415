const BASE_XP: u32 = 10;
const STREAK_STEP: u32 = 5;
const STREAK_BONUS: u32 = 5;

/// XP for a correct answer given the streak *after* counting that answer.
pub fn xp_for_correct(streak: u32) -> u32 {
    BASE_XP.saturating_add((streak / STREAK_STEP) * STREAK_BONUS)
}

pub fn level_from_xp(xp: u32) -> u32 {
    (xp / 100).isqrt() + 1
}

// Wide enough for the level above `level_from_xp(u32::MAX)`.
fn level_floor_xp(level: u32) -> u64 {
    let steps = level.saturating_sub(1) as u64;
    steps * steps * 100
}

pub fn xp_to_next_level(xp: u32) -> u32 {
    let next = level_floor_xp(level_from_xp(xp) + 1);
    u32::try_from(next - xp as u64).unwrap_or(u32::MAX)
}

/// Progress through the current level, 0.0..100.0.
pub fn xp_progress_percent(xp: u32) -> f64 {
    let level = level_from_xp(xp);
    let floor = level_floor_xp(level);
    let ceil = level_floor_xp(level + 1);
    (xp as u64 - floor) as f64 / (ceil - floor) as f64 * 100.0
}
