//! # Encore
//!
//! Core of a setlist and chord-chart tool: song text rendering, chord
//! transposition, setlist state and export.
//!
//! ## Data Flow
//! ```text
//! Song.content + Song.key_transposition
//!     → transpose_text_with()   chords and key line rewritten
//!     → render_markup()         HTML fragment, styled by DisplaySettings
//! ```
//!
//! ## Modules
//! - `markup` - Song text to HTML
//! - `transpose` - Chord scanner and transposition
//! - `settings` - Light/dark display settings
//! - `song` - Song and set records
//! - `state` - Setlist state and its reducer
//! - `library` - Song file import and folder sync
//! - `export` - Standalone HTML export and re-import
//! - `api` - Transpose-then-render helpers

pub mod api;
pub mod error;
pub mod export;
pub mod library;
pub mod markup;
pub mod settings;
pub mod song;
pub mod state;
pub mod transpose;

pub use api::{render_song, render_transposed};
pub use error::EncoreError;
pub use export::{export_file_name, export_html, load_setlist};
pub use library::{import_sources, is_song_file, song_name_from_file, FolderSession, SongSource};
pub use markup::render_markup;
pub use settings::{DisplaySettings, DisplaySettingsState, SectionKind};
pub use song::{SetColor, Song, SongId, SongSet};
pub use state::{AppState, Command};
pub use transpose::{
    clamp_offset, describe_offset, detect_key, transpose_text, transpose_text_with,
    TransposeOptions,
};
