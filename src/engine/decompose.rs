const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_COUNT: u32 = 19 * 21 * 28;
const PER_LEADING: u32 = 21 * 28;
const PER_VOWEL: u32 = 28;

const LEADING: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

const VOWELS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposed {
    pub leading: char,
    /// `None` for anything that is not a composed syllable block.
    pub vowel: Option<char>,
}

/// Split a composed syllable into leading consonant and vowel. Bare jamo and
/// other characters come back as `{ leading: glyph, vowel: None }`.
pub fn decompose(glyph: char) -> Decomposed {
    let offset = (glyph as u32).wrapping_sub(SYLLABLE_BASE);
    if offset >= SYLLABLE_COUNT {
        return Decomposed {
            leading: glyph,
            vowel: None,
        };
    }
    let lead = (offset / PER_LEADING) as usize;
    let vowel = ((offset % PER_LEADING) / PER_VOWEL) as usize;
    Decomposed {
        leading: LEADING[lead],
        vowel: Some(VOWELS[vowel]),
    }
}
