use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::catalog::Symbol;
use crate::engine::decompose::decompose;
use crate::engine::mastery::MasteryRecord;

pub const VOWEL_FOCUS: [char; 3] = ['ㅏ', 'ㅗ', 'ㅜ'];
pub const CONSONANT_FOCUS: [char; 3] = ['ㄱ', 'ㅁ', 'ㅂ'];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusMode {
    #[default]
    All,
    Vowel,
    Consonant,
}

impl FocusMode {
    pub fn to_key(self) -> &'static str {
        match self {
            FocusMode::All => "all",
            FocusMode::Vowel => "vowel",
            FocusMode::Consonant => "consonant",
        }
    }

    /// Unknown keys select `All`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "vowel" => FocusMode::Vowel,
            "consonant" => FocusMode::Consonant,
            _ => FocusMode::All,
        }
    }

    fn admits(self, symbol: &Symbol) -> bool {
        let parts = decompose(symbol.glyph);
        match self {
            FocusMode::All => true,
            FocusMode::Vowel => parts.vowel.is_some_and(|v| VOWEL_FOCUS.contains(&v)),
            FocusMode::Consonant => CONSONANT_FOCUS.contains(&parts.leading),
        }
    }
}

/// Everything a draw depends on besides the exclusion window.
#[derive(Clone, Copy, Debug)]
pub struct DrawContext<'a> {
    pub unlocked: &'a [Symbol],
    pub mastery: &'a MasteryRecord,
    pub focus: FocusMode,
}

impl<'a> DrawContext<'a> {
    pub fn new(unlocked: &'a [Symbol], mastery: &'a MasteryRecord, focus: FocusMode) -> Self {
        Self {
            unlocked,
            mastery,
            focus,
        }
    }

    /// Eligible symbols before exclusion. Mastered symbols drop out unless
    /// everything unlocked is mastered; an empty focus filter is ignored.
    pub fn eligible(&self) -> Vec<Symbol> {
        let mut learning: Vec<Symbol> = self
            .unlocked
            .iter()
            .copied()
            .filter(|s| !self.mastery.is_mastered(s.glyph))
            .collect();
        if learning.is_empty() {
            learning = self.unlocked.to_vec();
        }

        let focused: Vec<Symbol> = learning
            .iter()
            .copied()
            .filter(|s| self.focus.admits(s))
            .collect();
        if focused.is_empty() { learning } else { focused }
    }

    /// Eligible symbols minus `exclude`, unless that leaves nothing.
    pub fn candidates(&self, exclude: &[char]) -> Vec<Symbol> {
        let eligible = self.eligible();
        let kept: Vec<Symbol> = eligible
            .iter()
            .copied()
            .filter(|s| !exclude.contains(&s.glyph))
            .collect();
        if kept.is_empty() { eligible } else { kept }
    }

    /// Uniform draw. `None` only when nothing is unlocked.
    pub fn select_next<R: Rng + ?Sized>(&self, exclude: &[char], rng: &mut R) -> Option<Symbol> {
        self.candidates(exclude).choose(rng).copied()
    }
}
