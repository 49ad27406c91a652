//! # Songs and Sets
//!
//! The persisted setlist records. Field names serialize in camelCase so saved
//! state and exported setlists share one JSON shape.
//!
//! ## Type Hierarchy
//! ```text
//! AppState (see `state`)
//!   ├── all_songs: Vec<Song>      library
//!   └── sets: Vec<SongSet>
//!         └── songs: Vec<Song>    performance order, independent copies
//! ```
//!
//! A song's `content` is the canonical text. Transposition is a view computed
//! from `content` and `key_transposition`; it never rewrites the stored text.

use serde::{Deserialize, Deserializer, Serialize};

use crate::transpose::{
    clamp_offset, detect_key, transpose_text_with, TransposeOptions, MAX_OFFSET, MIN_OFFSET,
};

pub type SongId = u64;

/// Ids written by older exports may be fractional; they are truncated.
fn deserialize_id<'de, D>(deserializer: D) -> Result<SongId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.max(0.0) as SongId)
}

/// Saved offsets outside the song range are pulled back into it.
fn deserialize_offset<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.clamp(f64::from(MIN_OFFSET), f64::from(MAX_OFFSET)) as i32)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: SongId,
    pub name: String,
    pub content: String,
    /// Length in seconds
    #[serde(default)]
    pub duration: u32,
    /// Content as first imported, kept once the song has been edited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Semitone offset in `[-6, 6]`
    #[serde(default, deserialize_with = "deserialize_offset")]
    pub key_transposition: i32,
}

impl Song {
    pub fn new(id: SongId, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
            duration: 0,
            original_content: None,
            is_modified: false,
            last_modified: None,
            key_transposition: 0,
        }
    }

    /// Content with the song's offset applied.
    pub fn transposed_content(&self, options: &TransposeOptions) -> String {
        transpose_text_with(&self.content, self.key_transposition, options)
    }

    /// Key shown for the current offset, read from the `**Key:**` line.
    pub fn current_key(&self) -> Option<String> {
        detect_key(&self.transposed_content(&TransposeOptions::default()))
    }

    /// Shift the offset by `delta` semitones, clamped to the allowed range.
    pub fn transpose_by(&mut self, delta: i32) {
        self.key_transposition = clamp_offset(self.key_transposition.saturating_add(delta));
    }

    pub fn reset_key(&mut self) {
        self.key_transposition = 0;
    }

    /// Replace the content after an edit.
    ///
    /// The first edit records the imported text as `original_content`;
    /// `is_modified` compares against it, so editing back to the original
    /// clears the flag.
    pub fn edit(&mut self, content: impl Into<String>, modified_at: Option<String>) {
        let content = content.into();
        let original = self
            .original_content
            .take()
            .unwrap_or_else(|| self.content.clone());
        self.is_modified = content != original;
        self.original_content = Some(original);
        self.content = content;
        self.last_modified = modified_at;
    }

    /// Restore the imported text. Returns false when the song was never edited.
    pub fn revert(&mut self) -> bool {
        match &self.original_content {
            Some(original) => {
                self.content = original.clone();
                self.is_modified = false;
                true
            }
            None => false,
        }
    }
}

/// Accent color of a set. Unrecognized names load as blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetColor {
    Green,
    Purple,
    Orange,
    Red,
    Teal,
    Pink,
    Indigo,
    #[default]
    #[serde(other)]
    Blue,
}

impl SetColor {
    pub const ALL: [SetColor; 8] = [
        SetColor::Blue,
        SetColor::Green,
        SetColor::Purple,
        SetColor::Orange,
        SetColor::Red,
        SetColor::Teal,
        SetColor::Pink,
        SetColor::Indigo,
    ];

    /// Color given to the set created at `index`; new sets rotate through
    /// the first four colors.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn name(self) -> &'static str {
        match self {
            SetColor::Blue => "blue",
            SetColor::Green => "green",
            SetColor::Purple => "purple",
            SetColor::Orange => "orange",
            SetColor::Red => "red",
            SetColor::Teal => "teal",
            SetColor::Pink => "pink",
            SetColor::Indigo => "indigo",
        }
    }
}

/// An ordered group of songs played together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongSet {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: SongId,
    pub name: String,
    pub songs: Vec<Song>,
    #[serde(default)]
    pub color: SetColor,
}

impl SongSet {
    pub fn new(id: SongId, name: impl Into<String>, color: SetColor) -> Self {
        Self {
            id,
            name: name.into(),
            songs: Vec::new(),
            color,
        }
    }

    /// Total of the song durations, in seconds.
    pub fn duration(&self) -> u32 {
        self.songs.iter().map(|song| song.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_json_shape() {
        let mut song = Song::new(3, "Hallelujah", "**Key:** C Major");
        song.key_transposition = 2;
        let json = serde_json::to_string(&song).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"name":"Hallelujah","content":"**Key:** C Major","duration":0,"isModified":false,"keyTransposition":2}"#
        );
    }

    #[test]
    fn test_song_defaults_and_fractional_id() {
        let song: Song =
            serde_json::from_str(r#"{"id":1712345678901.42,"name":"A","content":"x"}"#).unwrap();
        assert_eq!(song.id, 1712345678901);
        assert_eq!(song.duration, 0);
        assert_eq!(song.key_transposition, 0);
        assert!(!song.is_modified);
    }

    #[test]
    fn test_saved_offset_is_clamped() {
        let song: Song = serde_json::from_str(
            r#"{"id":1,"name":"A","content":"[B]","keyTransposition":2147483647}"#,
        )
        .unwrap();
        assert_eq!(song.key_transposition, 6);

        let song: Song =
            serde_json::from_str(r#"{"id":1,"name":"A","content":"[B]","keyTransposition":-40}"#)
                .unwrap();
        assert_eq!(song.key_transposition, -6);
        assert_eq!(song.transposed_content(&TransposeOptions::default()), "[F]");
    }

    #[test]
    fn test_transpose_view_leaves_content() {
        let mut song = Song::new(1, "S", "**Key:** D Major\n`[D]` la");
        song.transpose_by(2);
        assert_eq!(song.transposed_content(&TransposeOptions::default()), "**Key:** E Major\n`[E]` la");
        assert_eq!(song.content, "**Key:** D Major\n`[D]` la");
        assert_eq!(song.current_key().as_deref(), Some("E Major"));
    }

    #[test]
    fn test_transpose_by_clamps() {
        let mut song = Song::new(1, "S", "");
        song.transpose_by(5);
        song.transpose_by(5);
        assert_eq!(song.key_transposition, 6);
        song.transpose_by(-20);
        assert_eq!(song.key_transposition, -6);
        song.reset_key();
        assert_eq!(song.key_transposition, 0);
    }

    #[test]
    fn test_edit_tracks_original() {
        let mut song = Song::new(1, "S", "first");
        assert!(!song.revert());

        song.edit("second", Some("2024-05-01T10:00:00Z".to_string()));
        assert!(song.is_modified);
        assert_eq!(song.original_content.as_deref(), Some("first"));
        assert_eq!(song.last_modified.as_deref(), Some("2024-05-01T10:00:00Z"));

        song.edit("third", None);
        assert_eq!(song.original_content.as_deref(), Some("first"));

        song.edit("first", None);
        assert!(!song.is_modified);

        song.edit("changed", None);
        assert!(song.revert());
        assert_eq!(song.content, "first");
        assert!(!song.is_modified);
    }

    #[test]
    fn test_set_colors() {
        assert_eq!(SetColor::for_index(0), SetColor::Blue);
        assert_eq!(SetColor::for_index(3), SetColor::Orange);
        assert_eq!(SetColor::for_index(4), SetColor::Blue);
        let set: SongSet = serde_json::from_str(r#"{"id":1,"name":"Set 1","songs":[]}"#).unwrap();
        assert_eq!(set.color, SetColor::Blue);
        assert_eq!(set.duration(), 0);
    }

    #[test]
    fn test_unknown_set_color_falls_back_to_blue() {
        let set: SongSet =
            serde_json::from_str(r#"{"id":2,"name":"Encore","songs":[],"color":"chartreuse"}"#)
                .unwrap();
        assert_eq!(set.color, SetColor::Blue);
        let set: SongSet =
            serde_json::from_str(r#"{"id":2,"name":"Encore","songs":[],"color":"teal"}"#).unwrap();
        assert_eq!(set.color, SetColor::Teal);
    }
}
