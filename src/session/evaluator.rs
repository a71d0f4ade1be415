use chrono::NaiveDate;
use tracing::info;

use crate::engine::catalog::Symbol;
use crate::engine::mastery::{MAX_SCORE, MasteryRecord};
use crate::engine::scoring::{level_from_xp, xp_for_correct};
use crate::store::SessionState;

/// Result of one submitted answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub correct: bool,
    pub symbol: Symbol,
    pub new_score: u8,
    pub streak: u32,
    pub streak_broken: bool,
    pub xp_gained: u32,
    pub mastery_just_achieved: bool,
    pub leveled_up: bool,
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintReveal {
    pub romanization: &'static str,
    pub penalty_applied: bool,
}

pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn is_correct(text: &str, symbol: &Symbol) -> bool {
    normalize_answer(text) == symbol.romanization
}

/// Score `text` against `symbol`, mutating mastery, aggregates and streak.
pub fn evaluate(
    text: &str,
    symbol: Symbol,
    mastery: &mut MasteryRecord,
    state: &mut SessionState,
    streak: &mut u32,
    today: NaiveDate,
) -> Outcome {
    if !is_correct(text, &symbol) {
        let new_score = mastery.adjust_score(symbol.glyph, -1);
        *streak = 0;
        return Outcome {
            correct: false,
            symbol,
            new_score,
            streak: 0,
            streak_broken: true,
            xp_gained: 0,
            mastery_just_achieved: false,
            leveled_up: false,
            level: state.level,
        };
    }

    let prev_score = mastery.score(symbol.glyph);
    let new_score = mastery.adjust_score(symbol.glyph, 1);
    let mastery_just_achieved = prev_score < MAX_SCORE && new_score == MAX_SCORE;
    if mastery_just_achieved {
        info!(glyph = %symbol.glyph, "symbol mastered");
    }

    *streak = streak.saturating_add(1);
    state.session_score = state.session_score.saturating_add(1);
    state.best_streak = state.best_streak.max(*streak);
    let xp_gained = xp_for_correct(*streak);
    state.xp = state.xp.saturating_add(xp_gained);
    state.record_active_day(today);

    let leveled_up = sync_level(state);

    Outcome {
        correct: true,
        symbol,
        new_score,
        streak: *streak,
        streak_broken: false,
        xp_gained,
        mastery_just_achieved,
        leveled_up,
        level: state.level,
    }
}

/// Raise the cached level to match XP. True only on the call that crosses
/// a threshold.
pub fn sync_level(state: &mut SessionState) -> bool {
    let level = level_from_xp(state.xp);
    if level > state.level {
        info!(level, xp = state.xp, "level up");
        state.level = level;
        true
    } else {
        false
    }
}

/// Reveal the romanization. The score penalty and streak reset apply once
/// per presentation, tracked by `hint_shown`.
pub fn apply_hint(
    symbol: Symbol,
    mastery: &mut MasteryRecord,
    streak: &mut u32,
    hint_shown: &mut bool,
) -> HintReveal {
    let penalty_applied = !*hint_shown;
    if penalty_applied {
        mastery.adjust_score(symbol.glyph, -1);
        *streak = 0;
        *hint_shown = true;
    }
    HintReveal {
        romanization: symbol.romanization,
        penalty_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::HANGUL_JAMO;

    const GIYEOK: Symbol = Symbol {
        glyph: 'ㄱ',
        romanization: "g",
    };

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2026, 10, 16)
    }

    #[test]
    fn test_normalization() {
        assert!(is_correct("  G \n", &GIYEOK));
        assert!(!is_correct("k", &GIYEOK));
        assert!(!is_correct("", &GIYEOK));
    }

    #[test]
    fn test_correct_answer_updates_everything() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let mut state = SessionState::default();
        let mut streak = 0;
        let outcome = evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert!(outcome.correct);
        assert!(!outcome.streak_broken);
        assert_eq!(outcome.new_score, 1);
        assert_eq!(outcome.xp_gained, 10);
        assert_eq!(streak, 1);
        assert_eq!(state.best_streak, 1);
        assert_eq!(state.session_score, 1);
        assert_eq!(state.xp, 10);
        assert_eq!(state.daily_streak, 1);
        assert_eq!(state.last_active, Some(today()));
    }

    #[test]
    fn test_streak_bonus_uses_post_increment_streak() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let mut state = SessionState::default();
        let mut streak = 6;
        let outcome = evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert_eq!(streak, 7);
        assert_eq!(outcome.xp_gained, 15);
    }

    #[test]
    fn test_incorrect_at_zero_floors() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let mut state = SessionState::default();
        let mut streak = 4;
        let outcome = evaluate("x", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert!(!outcome.correct);
        assert!(outcome.streak_broken);
        assert_eq!(outcome.new_score, 0);
        assert_eq!(streak, 0);
        assert_eq!(state.xp, 0);
        assert_eq!(state.daily_streak, 0);
        assert_eq!(state.best_streak, 0);
    }

    #[test]
    fn test_incorrect_decrements_score() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        mastery.set_score('ㄱ', 3);
        let mut state = SessionState::default();
        let mut streak = 0;
        let outcome = evaluate("k", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert_eq!(outcome.new_score, 2);
    }

    #[test]
    fn test_mastery_event_fires_once() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        mastery.set_score('ㄱ', 4);
        let mut state = SessionState::default();
        let mut streak = 0;
        let first = evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert!(first.mastery_just_achieved);
        assert_eq!(first.new_score, MAX_SCORE);
        let second = evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert!(!second.mastery_just_achieved);
        assert_eq!(second.new_score, MAX_SCORE);
    }

    #[test]
    fn test_level_up_fires_once_per_threshold() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let mut state = SessionState {
            xp: 95,
            ..SessionState::default()
        };
        let mut streak = 0;
        let outcome = evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert!(outcome.leveled_up);
        assert_eq!(outcome.level, 2);
        assert_eq!(state.level, 2);
        let next = evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert!(!next.leveled_up);
        assert_eq!(next.level, 2);
    }

    #[test]
    fn test_daily_streak_continues_from_yesterday() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let mut state = SessionState {
            daily_streak: 4,
            last_active: Some(day(2026, 10, 15)),
            ..SessionState::default()
        };
        let mut streak = 0;
        evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert_eq!(state.daily_streak, 5);
    }

    #[test]
    fn test_daily_streak_restarts_after_gap() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        let mut state = SessionState {
            daily_streak: 4,
            last_active: Some(day(2026, 10, 13)),
            ..SessionState::default()
        };
        let mut streak = 0;
        evaluate("g", GIYEOK, &mut mastery, &mut state, &mut streak, today());
        assert_eq!(state.daily_streak, 1);
        assert_eq!(state.last_active, Some(today()));
    }

    #[test]
    fn test_hint_penalty_applies_once() {
        let mut mastery = MasteryRecord::fresh(HANGUL_JAMO);
        mastery.set_score('ㄱ', 2);
        let mut streak = 3;
        let mut shown = false;
        let first = apply_hint(GIYEOK, &mut mastery, &mut streak, &mut shown);
        assert!(first.penalty_applied);
        assert_eq!(first.romanization, "g");
        assert_eq!(mastery.score('ㄱ'), 1);
        assert_eq!(streak, 0);

        streak = 2;
        let second = apply_hint(GIYEOK, &mut mastery, &mut streak, &mut shown);
        assert!(!second.penalty_applied);
        assert_eq!(mastery.score('ㄱ'), 1);
        assert_eq!(streak, 2);
    }
}
