//! Chord label to Nashville number conversion.
//!
//! Converts chord labels (`C`, `Am`, `F#dim`, `Bbmaj7`, ...) into scale-degree
//! roman numerals relative to a key, e.g. `Am` in C major is `vi`.
//!
//! # Rules
//! - `""` or `"N"` (no chord) → `—`
//! - Root is a letter A-G plus an optional `#`/`b`; anything else → `?`
//! - Degrees that fall between scale steps use a flat glyph: `♭II`, `♭III`, `♭V`, `♭VI`, `♭VII`
//! - Minor-ish qualities (`m`, `m7`, `dim`, but not `maj`) lower-case the numeral
//! - Any quality containing `7` appends `⁷`, whatever kind of seventh it is

use crate::model::{Mode, PitchClass, NO_CHORD};

/// Glyph for "no chord".
pub const NO_CHORD_GLYPH: &str = "—";

/// Numeral for labels without a recognisable root.
pub const UNKNOWN_NUMERAL: &str = "?";

const SEVENTH_GLYPH: char = '⁷';

const NUMERALS: [&str; 12] = [
    "I", "♭II", "II", "♭III", "III", "IV", "♭V", "V", "♭VI", "VI", "♭VII", "VII",
];

/// Split a chord label into its root pitch class and the quality text after it.
///
/// Returns `None` when the label does not start with a root in the spelling table.
pub fn chord_root(label: &str) -> Option<(PitchClass, &str)> {
    let letter = label.chars().next().filter(|c| ('A'..='G').contains(c))?;
    let with_accidental = label
        .get(..2)
        .filter(|s| s.ends_with('#') || s.ends_with('b'));

    let root_len = with_accidental.map_or(letter.len_utf8(), str::len);
    let root = PitchClass::from_spelling(&label[..root_len])?;
    Some((root, &label[root_len..]))
}

/// Convert a chord label into a Nashville number relative to `tonic`.
///
/// `mode` is accepted so callers can pass the whole key, but the case of the
/// numeral comes from the chord's own quality, not from the key's mode.
///
/// # Examples
/// ```
/// use chordgrid::{to_nashville, Mode, PitchClass};
///
/// let c = PitchClass::C;
/// assert_eq!(to_nashville("G", c, Mode::Major), "V");
/// assert_eq!(to_nashville("Am", c, Mode::Major), "vi");
/// assert_eq!(to_nashville("Dm7", c, Mode::Major), "ii⁷");
/// assert_eq!(to_nashville("N", c, Mode::Major), "—");
/// ```
pub fn to_nashville(chord_label: &str, tonic: PitchClass, _mode: Mode) -> String {
    if chord_label.is_empty() || chord_label == NO_CHORD {
        return NO_CHORD_GLYPH.to_string();
    }
    let Some((root, quality)) = chord_root(chord_label) else {
        return UNKNOWN_NUMERAL.to_string();
    };
    let quality = quality.to_lowercase();

    let degree = root.interval_from(tonic) as usize;
    let mut numeral = NUMERALS[degree].to_string();

    if is_minorish(&quality) {
        numeral = numeral.to_lowercase();
    }
    if quality.contains('7') {
        numeral.push(SEVENTH_GLYPH);
    }
    numeral
}

fn is_minorish(quality: &str) -> bool {
    (quality.starts_with('m') && !quality.contains("maj")) || quality.contains("dim")
}
