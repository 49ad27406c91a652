//! # Transposition Module
//!
//! Rewrite the chords of a song text for a different key.
//!
//! ## Purpose
//! Songs are stored in their original key. A performer can shift a song up or
//! down by a few semitones; this module produces the shifted text without ever
//! modifying the stored original.
//!
//! ## Sub-modules
//! - `notes` - Chromatic tables and single-note transposition
//! - `lexer` - Chord token scanner over free-form song text
//! - `engine` - Whole-text transposition built on the lexer
//! - `offset` - Offset clamping and display labels
//!
//! ## Recognized Tokens
//! | Shape | Example | Rewritten |
//! |-------|---------|-----------|
//! | Backtick-bracketed chord | `` `[Am7]` `` | root |
//! | Bracketed chord | `[F#m]` | root |
//! | Slash chord (either form) | `[C/G]` | root and bass |
//! | Bare chord word (opt-in) | `Am7` | root |
//! | Key metadata line | `**Key:** D Major` | key note |
//!
//! Qualities (`m7`, `sus4`, `add9`, ...), delimiters, spacing and all other
//! text are copied through byte for byte.
//!
//! ## Spelling
//! Upward shifts spell with sharps, downward shifts with flats. ASCII input
//! (`#`, `b`) produces ASCII output; `♯`/`♭` input keeps the symbols.
//!
//! ## Example
//! ```rust
//! use encore::transpose::{transpose_text_with, TransposeOptions};
//!
//! let song = "**Key:** G Major\n`[G]` Amazing grace `[C/G]` how sweet";
//! let up = transpose_text_with(song, 2, &TransposeOptions::default());
//! assert_eq!(up, "**Key:** A Major\n`[A]` Amazing grace `[D/A]` how sweet");
//! ```
//!
//! ## Related Modules
//! - `markup` - Renders the (transposed) text for display
//! - `song` - Owns the per-song offset

mod engine;
mod lexer;
mod notes;
mod offset;


pub use engine::{detect_key, transpose_chord_name, transpose_text, transpose_text_with, TransposeOptions};
pub use lexer::{ChordForm, ChordLexer, ChordToken, Token, CHORD_QUALITIES, KEY_LABEL};
pub use notes::{note_index, transpose_note, NOTES_FLAT, NOTES_SHARP};
pub use offset::{clamp_offset, describe_offset, MAX_OFFSET, MIN_OFFSET};
