//! Fixed jamo catalogs and Hangul syllable arithmetic.
//!
//! All codepoint arithmetic lives in this module; the automaton never
//! computes raw offsets itself. The catalogs are the 19 leading consonants
//! (choseong), 21 vowels (jungseong) and 28 trailing consonants (jongseong,
//! index 0 = none) of the algorithmic Hangul syllable encoding, plus the two
//! phonetic combination tables: vowel diphthongs (ㅗ+ㅏ→ㅘ) and trailing
//! consonant clusters (ㄱ+ㅅ→ㄳ). Every combined entry has a registered
//! decomposition, which backspace uses to peel a keystroke back off.
//!
//! All lookups are total: an unknown codepoint or out-of-range index yields
//! `None`, never a panic.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// First codepoint of the precomposed syllable block (가).
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Last codepoint of the precomposed syllable block (힣).
pub const SYLLABLE_END: u32 = 0xD7A3;

const COMPAT_CONSONANT_START: u32 = 0x3131; // ㄱ
const COMPAT_CONSONANT_END: u32 = 0x314E; // ㅎ
const COMPAT_VOWEL_START: u32 = 0x314F; // ㅏ
const COMPAT_VOWEL_END: u32 = 0x3163; // ㅣ

/// Number of leading consonant slots.
pub const LEADING_COUNT: usize = 19;
/// Number of vowel slots.
pub const VOWEL_COUNT: usize = 21;
/// Number of trailing consonant slots, including "none" at index 0.
pub const TRAILING_COUNT: usize = 28;

/// Leading consonants in syllable-index order.
const LEADING: [char; LEADING_COUNT] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels in syllable-index order. The compatibility block lists them
/// contiguously from U+314F, so index lookups are plain arithmetic.
const VOWEL: [char; VOWEL_COUNT] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants for indices 1..=27; index 0 is "no trailing".
const TRAILING: [char; TRAILING_COUNT - 1] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ',
    'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Registered vowel fusions as (first, second, combined).
///
/// Three pairs per round vowel (ㅗ, ㅜ) and one for the flat vowel (ㅡ);
/// no other ordered pair of vowels fuses.
const VOWEL_PAIRS: [(char, char, char); 7] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

/// Registered trailing consonant fusions as (first, second, cluster).
const TRAILING_PAIRS: [(char, char, char); 11] = [
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

static VOWEL_COMBINE: Lazy<HashMap<(char, char), char>> =
    Lazy::new(|| VOWEL_PAIRS.iter().map(|&(a, b, c)| ((a, b), c)).collect());

static VOWEL_SPLIT: Lazy<HashMap<char, (char, char)>> =
    Lazy::new(|| VOWEL_PAIRS.iter().map(|&(a, b, c)| (c, (a, b))).collect());

static TRAILING_COMBINE: Lazy<HashMap<(char, char), char>> =
    Lazy::new(|| TRAILING_PAIRS.iter().map(|&(a, b, c)| ((a, b), c)).collect());

static TRAILING_SPLIT: Lazy<HashMap<char, (char, char)>> =
    Lazy::new(|| TRAILING_PAIRS.iter().map(|&(a, b, c)| (c, (a, b))).collect());

/// Classification of a single codepoint as seen by the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JamoClass {
    /// Not Hangul; opaque to the composition engine.
    Other,
    /// Consonant-shaped compatibility jamo (ㄱ..ㅎ).
    Consonant,
    /// Vowel-shaped compatibility jamo (ㅏ..ㅣ).
    Vowel,
    /// Precomposed syllable block (가..힣).
    Syllable,
}

/// Classify one codepoint by its Unicode sub-range.
pub fn classify(ch: char) -> JamoClass {
    match ch as u32 {
        COMPAT_CONSONANT_START..=COMPAT_CONSONANT_END => JamoClass::Consonant,
        COMPAT_VOWEL_START..=COMPAT_VOWEL_END => JamoClass::Vowel,
        SYLLABLE_BASE..=SYLLABLE_END => JamoClass::Syllable,
        _ => JamoClass::Other,
    }
}

/// Index of a compatibility jamo in the leading consonant catalog.
pub fn leading_index(ch: char) -> Option<usize> {
    LEADING.iter().position(|&c| c == ch)
}

/// Index of a compatibility jamo in the vowel catalog.
pub fn vowel_index(ch: char) -> Option<usize> {
    let offset = (ch as u32).checked_sub(COMPAT_VOWEL_START)? as usize;
    (offset < VOWEL_COUNT).then_some(offset)
}

/// Index of a compatibility jamo in the trailing consonant catalog.
/// Index 0 ("no trailing") is never returned for a character.
pub fn trailing_index(ch: char) -> Option<usize> {
    TRAILING.iter().position(|&c| c == ch).map(|i| i + 1)
}

/// Leading consonant character for a catalog index.
pub fn leading(index: usize) -> Option<char> {
    LEADING.get(index).copied()
}

/// Vowel character for a catalog index.
pub fn vowel(index: usize) -> Option<char> {
    VOWEL.get(index).copied()
}

/// Trailing consonant character for a catalog index; index 0 is "none".
pub fn trailing(index: usize) -> Option<char> {
    if index == 0 {
        return None;
    }
    TRAILING.get(index - 1).copied()
}

/// Compose a syllable codepoint from catalog indices.
///
/// Implements `base + (lead*21 + vowel)*28 + trail` over the algorithmic
/// syllable block. Returns `None` when any index is out of range; callers
/// must check before using the result.
pub fn compose_syllable(lead: usize, vowel: usize, trail: usize) -> Option<char> {
    if lead >= LEADING_COUNT || vowel >= VOWEL_COUNT || trail >= TRAILING_COUNT {
        return None;
    }
    let offset = (lead * VOWEL_COUNT + vowel) * TRAILING_COUNT + trail;
    char::from_u32(SYLLABLE_BASE + offset as u32)
}

/// Inverse of [`compose_syllable`]; defined only inside the syllable block.
pub fn decompose_syllable(ch: char) -> Option<(usize, usize, usize)> {
    let code = ch as u32;
    if !(SYLLABLE_BASE..=SYLLABLE_END).contains(&code) {
        return None;
    }
    let offset = (code - SYLLABLE_BASE) as usize;
    Some((
        offset / (VOWEL_COUNT * TRAILING_COUNT),
        offset / TRAILING_COUNT % VOWEL_COUNT,
        offset % TRAILING_COUNT,
    ))
}

/// Fuse two vowels into a diphthong, if the ordered pair is registered.
pub fn combine_vowels(first: char, second: char) -> Option<char> {
    VOWEL_COMBINE.get(&(first, second)).copied()
}

/// Fuse two trailing consonants into a cluster, if the ordered pair is
/// registered.
pub fn combine_trailing(first: char, second: char) -> Option<char> {
    TRAILING_COMBINE.get(&(first, second)).copied()
}

/// Registered inverse of [`combine_vowels`].
pub fn decompose_vowel(combined: char) -> Option<(char, char)> {
    VOWEL_SPLIT.get(&combined).copied()
}

/// Registered inverse of [`combine_trailing`].
pub fn decompose_trailing(combined: char) -> Option<(char, char)> {
    TRAILING_SPLIT.get(&combined).copied()
}
