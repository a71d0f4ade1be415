/// A practicable glyph and the romanization a learner is expected to type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub glyph: char,
    pub romanization: &'static str,
}

const fn sym(glyph: char, romanization: &'static str) -> Symbol {
    Symbol {
        glyph,
        romanization,
    }
}

/// Unlock order: basic consonants, tense consonants, then vowels.
/// The unlocked set is always a prefix of this list.
pub const HANGUL_JAMO: &[Symbol] = &[
    sym('ㄱ', "g"),
    sym('ㄴ', "n"),
    sym('ㄷ', "d"),
    sym('ㄹ', "r"),
    sym('ㅁ', "m"),
    sym('ㅂ', "b"),
    sym('ㅅ', "s"),
    sym('ㅇ', "ng"),
    sym('ㅈ', "j"),
    sym('ㅊ', "ch"),
    sym('ㅋ', "k"),
    sym('ㅌ', "t"),
    sym('ㅍ', "p"),
    sym('ㅎ', "h"),
    sym('ㄲ', "kk"),
    sym('ㄸ', "tt"),
    sym('ㅃ', "pp"),
    sym('ㅆ', "ss"),
    sym('ㅉ', "jj"),
    sym('ㅏ', "a"),
    sym('ㅑ', "ya"),
    sym('ㅓ', "eo"),
    sym('ㅕ', "yeo"),
    sym('ㅗ', "o"),
    sym('ㅛ', "yo"),
    sym('ㅜ', "u"),
    sym('ㅠ', "yu"),
    sym('ㅡ', "eu"),
    sym('ㅣ', "i"),
    sym('ㅐ', "ae"),
    sym('ㅒ', "yae"),
    sym('ㅔ', "e"),
    sym('ㅖ', "ye"),
    sym('ㅘ', "wa"),
    sym('ㅙ', "wae"),
    sym('ㅚ', "oe"),
    sym('ㅝ', "wo"),
    sym('ㅞ', "we"),
    sym('ㅟ', "wi"),
    sym('ㅢ', "ui"),
];
