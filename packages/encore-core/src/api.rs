//! # Public API
//!
//! Entry points that combine transposition and rendering.
//!
//! ## Functions
//!
//! - [`render_song()`] - Render a stored song at its own transposition
//! - [`render_transposed()`] - Render raw song text shifted by an offset
//!
//! The two core transforms stay separate underneath: text is transposed
//! first, and the renderer only ever sees the transposed text.
//!
//! ## Typical Usage
//!
//! ```rust
//! use encore::{render_transposed, DisplaySettings};
//!
//! let song = "**Key:** D Major\n`[D]` Morning has broken";
//! let html = render_transposed(song, 2, &DisplaySettings::light());
//! assert!(html.contains("E Major"));
//! assert!(html.contains("[E]</code>"));
//! ```

use crate::markup::render_markup;
use crate::settings::DisplaySettings;
use crate::song::Song;
use crate::transpose::{clamp_offset, transpose_text_with, TransposeOptions};

/// Render a song with its stored key offset applied.
///
/// # Example
/// ```rust
/// use encore::{render_song, DisplaySettings, Song, TransposeOptions};
///
/// let mut song = Song::new(1, "Hymn", "`[C]` Holy");
/// song.transpose_by(-1);
/// let html = render_song(&song, &DisplaySettings::dark(), &TransposeOptions::default());
/// assert!(html.contains("[B]</code> Holy"));
/// ```
pub fn render_song(song: &Song, settings: &DisplaySettings, options: &TransposeOptions) -> String {
    render_markup(&song.transposed_content(options), settings)
}

/// Render song text shifted by `semitones`, clamped to the song offset range.
pub fn render_transposed(text: &str, semitones: i32, settings: &DisplaySettings) -> String {
    let transposed = transpose_text_with(text, clamp_offset(semitones), &TransposeOptions::default());
    render_markup(&transposed, settings)
}
