//! Chromatic note tables and single-note transposition.

/// Chromatic scale spelled with sharps, indexed from C = 0.
pub const NOTES_SHARP: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// Chromatic scale spelled with flats, indexed from C = 0.
pub const NOTES_FLAT: [&str; 12] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];

/// Returns true for the root letters a chord token may start with.
pub fn is_note_letter(c: char) -> bool {
    matches!(c, 'A'..='G')
}

/// Returns true for the accidentals accepted after a root letter.
pub fn is_accidental(c: char) -> bool {
    matches!(c, '#' | 'b' | '♯' | '♭')
}

/// Rewrite ASCII accidentals to the symbols used by the note tables.
fn normalize(note: &str) -> String {
    note.replace('#', "♯").replace('b', "♭")
}

fn to_ascii(note: &str) -> String {
    note.replace('♯', "#").replace('♭', "b")
}

/// Position of a note on the chromatic circle (C = 0 .. B = 11).
///
/// Accepts ASCII (`F#`, `Bb`) and symbol (`F♯`, `B♭`) spellings. Returns `None`
/// for spellings that appear in neither table, such as `Cb` or `E#`.
pub fn note_index(note: &str) -> Option<usize> {
    let normalized = normalize(note);
    NOTES_SHARP
        .iter()
        .position(|n| *n == normalized)
        .or_else(|| NOTES_FLAT.iter().position(|n| *n == normalized))
}

/// Transpose a single note name by `semitones`.
///
/// Upward (and zero) shifts are spelled with sharps, downward shifts with flats.
/// The result keeps the accidental style of the input: a note written with `♯`
/// or `♭` comes back with symbols, anything else comes back in ASCII.
/// Unknown notes are returned unchanged.
///
/// # Examples
/// ```
/// use encore::transpose::transpose_note;
///
/// assert_eq!(transpose_note("D", 1), "D#");
/// assert_eq!(transpose_note("D", -1), "Db");
/// assert_eq!(transpose_note("B♭", 2), "C");
/// assert_eq!(transpose_note("C", 12), "C");
/// assert_eq!(transpose_note("Cb", 3), "Cb");
/// ```
pub fn transpose_note(note: &str, semitones: i32) -> String {
    let Some(index) = note_index(note) else {
        return note.to_string();
    };

    // Reduce first so any i32 offset stays in range.
    let new_index = (index + semitones.rem_euclid(12) as usize) % 12;
    let spelled = if semitones >= 0 {
        NOTES_SHARP[new_index]
    } else {
        NOTES_FLAT[new_index]
    };

    let uses_symbols = note.contains(['♯', '♭']);
    if uses_symbols {
        spelled.to_string()
    } else {
        to_ascii(spelled)
    }
}
