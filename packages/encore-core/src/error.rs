//! # Error Types
//!
//! This module defines the error type for the fallible parts of the Encore core.
//!
//! Rendering and transposition never fail: malformed song text passes through
//! unchanged. Errors only arise at the edges, when settings documents, song
//! folders or exported setlists are read.
//!
//! ## Error Types
//! - `Settings` - A display settings document could not be parsed
//! - `Io` - A song file or folder could not be read
//! - `Json` - Setlist state could not be (de)serialized
//! - `InvalidSetlist` - An exported setlist is missing data or structurally invalid
//!
//! ## Usage
//! ```rust
//! use encore::{load_setlist, EncoreError};
//!
//! match load_setlist("<html></html>") {
//!     Ok(state) => println!("{} sets", state.sets.len()),
//!     Err(EncoreError::InvalidSetlist(message)) => eprintln!("Not a setlist: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoreError {
    /// Invalid display settings document.
    ///
    /// # Example
    /// ```
    /// # use encore::EncoreError;
    /// let err = EncoreError::Settings("expected a mapping".to_string());
    /// assert_eq!(err.to_string(), "Invalid display settings: expected a mapping");
    /// ```
    #[error("Invalid display settings: {0}")]
    Settings(String),

    /// Filesystem error while reading songs, with the offending path.
    #[error("Could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Setlist state could not be serialized or deserialized.
    #[error("Invalid setlist data: {0}")]
    Json(#[from] serde_json::Error),

    /// Exported setlist is missing its embedded state or has no sets.
    ///
    /// # Example
    /// ```
    /// # use encore::EncoreError;
    /// let err = EncoreError::InvalidSetlist("no sets".to_string());
    /// assert_eq!(err.to_string(), "Invalid setlist format: no sets");
    /// ```
    #[error("Invalid setlist format: {0}")]
    InvalidSetlist(String),
}

impl EncoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
