//! # Song Library
//!
//! Importing song files into the setlist library.
//!
//! Song files are plain markdown or text (`.md`, `.txt`); the file name minus
//! its extension becomes the song name. Sources can come from anywhere (an
//! upload, a CLI argument, a folder) and become [`Song`]s through
//! [`import_sources`], which assigns ids.
//!
//! A [`FolderSession`] is the connection to one song folder. It is an explicit
//! value owned by whoever manages the sync, not process-wide state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::EncoreError;
use crate::song::{Song, SongId};

const SONG_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Song name for a file name: `Amazing Grace.md` → `Amazing Grace`.
pub fn song_name_from_file(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if SONG_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) => stem,
        _ => file_name,
    }
}

pub fn is_song_file(file_name: &str) -> bool {
    song_name_from_file(file_name) != file_name
}

/// A song file's name and text, before it has an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSource {
    pub name: String,
    pub content: String,
}

impl SongSource {
    /// Build a source from a file name, dropping a song file extension.
    pub fn new(file_name: impl AsRef<str>, content: impl Into<String>) -> Self {
        Self {
            name: song_name_from_file(file_name.as_ref()).to_string(),
            content: content.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, EncoreError> {
        let content = fs::read_to_string(path).map_err(|e| EncoreError::io(path, e))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, content))
    }
}

/// Turn sources into songs with consecutive ids starting at `first_id`.
pub fn import_sources(sources: Vec<SongSource>, first_id: SongId) -> Vec<Song> {
    sources
        .into_iter()
        .zip(first_id..)
        .map(|(source, id)| Song::new(id, source.name, source.content))
        .collect()
}

/// A connected song folder
#[derive(Debug, Clone)]
pub struct FolderSession {
    root: PathBuf,
}

impl FolderSession {
    /// Connect to `root`, which must be a readable directory.
    pub fn connect(root: impl Into<PathBuf>) -> Result<Self, EncoreError> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|e| EncoreError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(EncoreError::io(
                &root,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        info!(folder = %root.display(), "connected song folder");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder name shown to the user.
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Read every song file in the folder, sorted by file name.
    ///
    /// Files that cannot be read are skipped with a warning; failing to list
    /// the folder itself is an error.
    pub fn sync(&self) -> Result<Vec<SongSource>, EncoreError> {
        let entries = fs::read_dir(&self.root).map_err(|e| EncoreError::io(&self.root, e))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable folder entry");
                    None
                }
            })
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(is_song_file)
            })
            .collect();
        paths.sort();

        let mut sources = Vec::with_capacity(paths.len());
        for path in &paths {
            match SongSource::read(path) {
                Ok(source) => {
                    debug!(song = %source.name, "read song file");
                    sources.push(source);
                }
                Err(e) => warn!(error = %e, "skipping song file"),
            }
        }

        info!(
            folder = %self.root.display(),
            found = paths.len(),
            read = sources.len(),
            "folder sync complete"
        );
        Ok(sources)
    }

    /// Write a song's content back to the folder.
    ///
    /// An existing `.txt` file of the same name is updated in place; otherwise
    /// the song is written as `<name>.md`.
    pub fn save(&self, song: &Song) -> Result<PathBuf, EncoreError> {
        let stem: String = song
            .name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        let txt = self.root.join(format!("{}.txt", stem));
        let path = if txt.is_file() {
            txt
        } else {
            self.root.join(format!("{}.md", stem))
        };

        fs::write(&path, &song.content).map_err(|e| EncoreError::io(&path, e))?;
        info!(song = %song.name, path = %path.display(), "saved song to folder");
        Ok(path)
    }
}
