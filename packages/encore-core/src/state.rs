//! # Setlist State
//!
//! The whole application state and the single reducer that changes it.
//!
//! Every change goes through [`AppState::apply`] with a [`Command`]. Commands
//! carrying an index that does not exist are ignored, so a stale UI event can
//! never corrupt the state or panic.
//!
//! ## Selection Rules
//! - `current_song_index` is `-1` when no song is selected
//! - Removing the selected song deselects; removing an earlier one shifts the
//!   selection down
//! - Reordering follows the selected song to its new position
//! - Switching or removing a set deselects
//! - Entering performance mode selects the first song when none is selected
//!
//! ## Example
//! ```rust
//! use encore::state::{AppState, Command};
//! use encore::library::SongSource;
//!
//! let mut state = AppState::default();
//! state.apply(Command::AddSongs(vec![SongSource::new("Intro.md", "## Intro")]));
//! let song = state.all_songs[0].clone();
//! state.apply(Command::AddSongToCurrentSet(song));
//! state.apply(Command::TogglePerformanceMode);
//! assert_eq!(state.current_song_index, 0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::library::{import_sources, SongSource};
use crate::song::{SetColor, Song, SongId, SongSet};

pub const MIN_FONT_SIZE: u32 = 50;
pub const MAX_FONT_SIZE: u32 = 200;

fn default_setlist_name() -> String {
    "My Setlist".to_string()
}

fn default_font_size() -> u32 {
    100
}

fn no_selection() -> i64 {
    -1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default = "default_setlist_name")]
    pub setlist_name: String,
    #[serde(default)]
    pub all_songs: Vec<Song>,
    pub sets: Vec<SongSet>,
    #[serde(default)]
    pub current_set_index: usize,
    /// Index into the current set, `-1` for none
    #[serde(default = "no_selection")]
    pub current_song_index: i64,
    /// Percent of the base font size
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub is_dark_mode: bool,
    #[serde(default)]
    pub is_performance_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            setlist_name: default_setlist_name(),
            all_songs: Vec::new(),
            sets: vec![SongSet::new(1, "Set 1", SetColor::Blue)],
            current_set_index: 0,
            current_song_index: no_selection(),
            font_size: default_font_size(),
            is_dark_mode: false,
            is_performance_mode: false,
            export_date: None,
        }
    }
}

/// A state change requested by the user interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Command {
    SetSetlistName(String),
    /// Import into the library; ids are assigned here
    AddSongs(Vec<SongSource>),
    /// Append an independent copy to the current set
    AddSongToCurrentSet(Song),
    RemoveSongFromCurrentSet(usize),
    ReorderSongs { from: usize, to: usize },
    AddSet,
    RemoveSet(usize),
    SwitchToSet(usize),
    UpdateSetName { index: usize, name: String },
    SelectSong(usize),
    /// Move the selection by `±n`, clamped to the set
    NavigateSong(i64),
    SetFontSize(u32),
    ToggleDarkMode,
    TogglePerformanceMode,
    /// Save edited content for a song, wherever it appears
    #[serde(rename_all = "camelCase")]
    UpdateSongContent {
        id: SongId,
        content: String,
        modified_at: Option<String>,
    },
    /// Shift the selected song's key by this many semitones
    TransposeCurrentSong(i32),
    ResetCurrentSongKey,
    LoadState(Box<AppState>),
}

impl AppState {
    pub fn current_set(&self) -> Option<&SongSet> {
        self.sets.get(self.current_set_index)
    }

    fn current_set_mut(&mut self) -> Option<&mut SongSet> {
        self.sets.get_mut(self.current_set_index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        usize::try_from(self.current_song_index).ok()
    }

    pub fn current_song(&self) -> Option<&Song> {
        let index = self.selected_index()?;
        self.current_set()?.songs.get(index)
    }

    fn current_song_mut(&mut self) -> Option<&mut Song> {
        let index = self.selected_index()?;
        self.current_set_mut()?.songs.get_mut(index)
    }

    /// Next unused id across the library, every set and every set's songs.
    fn next_id(&self) -> SongId {
        let songs = self
            .all_songs
            .iter()
            .chain(self.sets.iter().flat_map(|set| set.songs.iter()))
            .map(|song| song.id);
        let sets = self.sets.iter().map(|set| set.id);
        songs.chain(sets).max().map_or(1, |max| max + 1)
    }

    pub fn apply(&mut self, command: Command) {
        debug!(?command, "applying command");

        match command {
            Command::SetSetlistName(name) => self.setlist_name = name,

            Command::AddSongs(sources) => {
                let songs = import_sources(sources, self.next_id());
                self.all_songs.extend(songs);
            }

            Command::AddSongToCurrentSet(song) => {
                if let Some(set) = self.current_set_mut() {
                    set.songs.push(song);
                }
            }

            Command::RemoveSongFromCurrentSet(index) => {
                let Some(set) = self.current_set_mut() else {
                    return;
                };
                if index >= set.songs.len() {
                    return;
                }
                set.songs.remove(index);

                if let Some(selected) = self.selected_index() {
                    if index == selected {
                        self.current_song_index = no_selection();
                    } else if index < selected {
                        self.current_song_index -= 1;
                    }
                }
            }

            Command::ReorderSongs { from, to } => {
                let Some(set) = self.current_set_mut() else {
                    return;
                };
                if from >= set.songs.len() || to >= set.songs.len() {
                    return;
                }
                let song = set.songs.remove(from);
                set.songs.insert(to, song);

                if let Some(selected) = self.selected_index() {
                    if from == selected {
                        self.current_song_index = to as i64;
                    } else if from < selected && to >= selected {
                        self.current_song_index -= 1;
                    } else if from > selected && to <= selected {
                        self.current_song_index += 1;
                    }
                }
            }

            Command::AddSet => {
                let count = self.sets.len();
                let set = SongSet::new(
                    self.next_id(),
                    format!("Set {}", count + 1),
                    SetColor::for_index(count),
                );
                self.sets.push(set);
            }

            Command::RemoveSet(index) => {
                if self.sets.len() <= 1 || index >= self.sets.len() {
                    return;
                }
                self.sets.remove(index);
                if index == self.current_set_index {
                    self.current_set_index = index.saturating_sub(1);
                } else if index < self.current_set_index {
                    self.current_set_index -= 1;
                }
                self.current_song_index = no_selection();
            }

            Command::SwitchToSet(index) => {
                if index < self.sets.len() {
                    self.current_set_index = index;
                    self.current_song_index = no_selection();
                }
            }

            Command::UpdateSetName { index, name } => {
                if let Some(set) = self.sets.get_mut(index) {
                    set.name = name;
                }
            }

            Command::SelectSong(index) => {
                let in_range = self.current_set().is_some_and(|set| index < set.songs.len());
                if in_range {
                    self.current_song_index = index as i64;
                }
            }

            Command::NavigateSong(direction) => {
                let Some(len) = self.current_set().map(|set| set.songs.len()) else {
                    return;
                };
                if len == 0 {
                    return;
                }
                let last = len as i64 - 1;
                self.current_song_index = (self.current_song_index + direction).clamp(0, last);
            }

            Command::SetFontSize(size) => {
                self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
            }

            Command::ToggleDarkMode => self.is_dark_mode = !self.is_dark_mode,

            Command::TogglePerformanceMode => {
                self.is_performance_mode = !self.is_performance_mode;
                let has_songs = self.current_set().is_some_and(|set| !set.songs.is_empty());
                if self.is_performance_mode && has_songs && self.selected_index().is_none() {
                    self.current_song_index = 0;
                }
            }

            Command::UpdateSongContent {
                id,
                content,
                modified_at,
            } => {
                let songs = self
                    .all_songs
                    .iter_mut()
                    .chain(self.sets.iter_mut().flat_map(|set| set.songs.iter_mut()))
                    .filter(|song| song.id == id);
                for song in songs {
                    song.edit(content.clone(), modified_at.clone());
                }
            }

            Command::TransposeCurrentSong(delta) => {
                if let Some(song) = self.current_song_mut() {
                    song.transpose_by(delta);
                }
            }

            Command::ResetCurrentSongKey => {
                if let Some(song) = self.current_song_mut() {
                    song.reset_key();
                }
            }

            Command::LoadState(state) => *self = *state,
        }
    }
}
