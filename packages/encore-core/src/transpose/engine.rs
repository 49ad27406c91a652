//! Chord transposition over whole song texts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lexer::{ChordLexer, Token};
use super::notes::{is_accidental, is_note_letter, transpose_note};

/// Options for [`transpose_text_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransposeOptions {
    /// Also transpose bare chord words in running text (`Am G C`).
    ///
    /// Off by default: prose words such as the article "A" are
    /// indistinguishable from chords and would be rewritten too.
    pub match_bare_chords: bool,
}

impl TransposeOptions {
    pub fn with_bare_chords() -> Self {
        Self {
            match_bare_chords: true,
        }
    }
}

/// Transpose every bracketed chord and the key line of `text` by `semitones`.
///
/// Only note letters and accidentals inside recognized tokens change; every
/// other byte is copied through. A zero shift returns the text unchanged.
///
/// # Examples
/// ```
/// use encore::transpose_text;
///
/// assert_eq!(transpose_text("`[Am7]` la la", 2), "`[Bm7]` la la");
/// assert_eq!(transpose_text("[C/G]", 1), "[C#/G#]");
/// assert_eq!(transpose_text("**Key:** D Major", 2), "**Key:** E Major");
/// ```
pub fn transpose_text(text: &str, semitones: i32) -> String {
    transpose_text_with(text, semitones, &TransposeOptions::default())
}

/// Transpose `text` by `semitones` using explicit [`TransposeOptions`].
pub fn transpose_text_with(text: &str, semitones: i32, options: &TransposeOptions) -> String {
    if semitones == 0 {
        return text.to_string();
    }

    let tokens = ChordLexer::new(text, options.match_bare_chords).tokenize();
    let mut out = String::with_capacity(text.len() + tokens.len());
    let mut last = 0;

    for token in &tokens {
        for note in token.note_ranges() {
            out.push_str(&text[last..note.start]);
            out.push_str(&transpose_note(&text[note.clone()], semitones));
            last = note.end;
        }
    }
    out.push_str(&text[last..]);

    debug!(
        semitones,
        tokens = tokens.len(),
        bare = options.match_bare_chords,
        "transposed song text"
    );
    out
}

/// Transpose a standalone chord name such as `F#m7` or `Bb/D`.
///
/// The leading root and an optional slash bass are rewritten; anything that
/// does not start with a note letter is returned unchanged.
///
/// # Examples
/// ```
/// use encore::transpose::transpose_chord_name;
///
/// assert_eq!(transpose_chord_name("F#m7", 1), "Gm7");
/// assert_eq!(transpose_chord_name("Bb/D", -2), "Ab/C");
/// assert_eq!(transpose_chord_name("N.C.", 3), "N.C.");
/// ```
pub fn transpose_chord_name(chord: &str, semitones: i32) -> String {
    let (body, bass) = match chord.split_once('/') {
        Some((body, bass)) if split_note(bass).is_some_and(|(_, rest)| rest.is_empty()) => {
            (body, Some(bass))
        }
        _ => (chord, None),
    };

    let Some((root, quality)) = split_note(body) else {
        return chord.to_string();
    };

    let mut out = transpose_note(root, semitones);
    out.push_str(quality);
    if let Some(bass) = bass {
        out.push('/');
        out.push_str(&transpose_note(bass, semitones));
    }
    out
}

/// Split a leading note name (letter plus optional accidental) from the rest.
fn split_note(s: &str) -> Option<(&str, &str)> {
    let mut chars = s.char_indices();
    let (_, letter) = chars.next()?;
    if !is_note_letter(letter) {
        return None;
    }
    let end = match chars.next() {
        Some((i, acc)) if is_accidental(acc) => i + acc.len_utf8(),
        Some((i, _)) => i,
        None => s.len(),
    };
    Some(s.split_at(end))
}

/// Read the song key from its `**Key:** <Note> <Major|Minor>` line.
///
/// # Examples
/// ```
/// use encore::transpose::detect_key;
///
/// assert_eq!(detect_key("# Song\n**Key:** Eb Minor\n"), Some("Eb Minor".to_string()));
/// assert_eq!(detect_key("no key here"), None);
/// ```
pub fn detect_key(text: &str) -> Option<String> {
    ChordLexer::new(text, false)
        .tokenize()
        .into_iter()
        .find_map(|token| match token {
            Token::Key { root, mode, .. } => {
                Some(format!("{} {}", &text[root], &text[mode]))
            }
            Token::Chord(_) => None,
        })
}
