//! # Display Settings
//!
//! Presentation preferences handed to the renderer: one color per song section,
//! the main text color, harmony tier colors, and visibility toggles.
//!
//! Two independent instances exist, one for light mode and one for dark mode.
//! The caller passes the instance matching the active mode (see
//! [`DisplaySettingsState::current`]).
//!
//! ## File Format
//! Settings documents are YAML (JSON is accepted as a subset). Keys are
//! camelCase and every key is optional; missing keys take the defaults.
//!
//! ```yaml
//! light:
//!   chorusColor: "#DC2626"
//!   boldChorus: true
//! dark:
//!   showChords: false
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EncoreError;

/// Song section types that receive their own header color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
    Solo,
    Interlude,
    Instrumental,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Intro,
        SectionKind::Verse,
        SectionKind::Chorus,
        SectionKind::Bridge,
        SectionKind::Outro,
        SectionKind::Solo,
        SectionKind::Interlude,
        SectionKind::Instrumental,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Intro => "Intro",
            SectionKind::Verse => "Verse",
            SectionKind::Chorus => "Chorus",
            SectionKind::Bridge => "Bridge",
            SectionKind::Outro => "Outro",
            SectionKind::Solo => "Solo",
            SectionKind::Interlude => "Interlude",
            SectionKind::Instrumental => "Instrumental",
        }
    }

    /// Recognize a section from header text such as `Verse 2` or `Chorus:`.
    ///
    /// The leading run of letters is compared case-insensitively, so
    /// `Pre-Chorus` is not a chorus.
    pub fn from_header(text: &str) -> Option<Self> {
        let trimmed = text.trim_start();
        let word_end = trimmed
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(trimmed.len());
        let word = &trimmed[..word_end];
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(word))
    }
}

/// Display preferences for one color mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub main_text_color: String,

    pub intro_color: String,
    pub verse_color: String,
    pub chorus_color: String,
    pub bridge_color: String,
    pub outro_color: String,
    pub solo_color: String,
    pub interlude_color: String,
    pub instrumental_color: String,

    pub harmony_high_color: String,
    pub harmony_low_color: String,

    pub show_chords: bool,
    pub show_key: bool,
    pub bold_chorus: bool,
    pub show_harmony_high: bool,
    pub show_harmony_low: bool,
}

impl DisplaySettings {
    /// Defaults for light mode
    pub fn light() -> Self {
        Self {
            main_text_color: "#1e293b".to_string(),
            intro_color: "#3B82F6".to_string(),
            verse_color: "#F97316".to_string(),
            chorus_color: "#EF4444".to_string(),
            bridge_color: "#8B5CF6".to_string(),
            outro_color: "#F59E0B".to_string(),
            solo_color: "#10B981".to_string(),
            interlude_color: "#06B6D4".to_string(),
            instrumental_color: "#EC4899".to_string(),
            harmony_high_color: "#2563EB".to_string(),
            harmony_low_color: "#059669".to_string(),
            show_chords: true,
            show_key: true,
            bold_chorus: false,
            show_harmony_high: true,
            show_harmony_low: true,
        }
    }

    /// Defaults for dark mode
    pub fn dark() -> Self {
        Self {
            main_text_color: "#f8fafc".to_string(),
            intro_color: "#60A5FA".to_string(),
            verse_color: "#FB923C".to_string(),
            chorus_color: "#F87171".to_string(),
            bridge_color: "#A78BFA".to_string(),
            outro_color: "#FBBF24".to_string(),
            solo_color: "#34D399".to_string(),
            interlude_color: "#22D3EE".to_string(),
            instrumental_color: "#F472B6".to_string(),
            harmony_high_color: "#93C5FD".to_string(),
            harmony_low_color: "#6EE7B7".to_string(),
            ..Self::light()
        }
    }

    pub fn section_color(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Intro => &self.intro_color,
            SectionKind::Verse => &self.verse_color,
            SectionKind::Chorus => &self.chorus_color,
            SectionKind::Bridge => &self.bridge_color,
            SectionKind::Outro => &self.outro_color,
            SectionKind::Solo => &self.solo_color,
            SectionKind::Interlude => &self.interlude_color,
            SectionKind::Instrumental => &self.instrumental_color,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::light()
    }
}

/// Light and dark settings, persisted together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettingsState {
    pub light: DisplaySettings,
    pub dark: DisplaySettings,
}

impl Default for DisplaySettingsState {
    fn default() -> Self {
        Self {
            light: DisplaySettings::light(),
            dark: DisplaySettings::dark(),
        }
    }
}

impl DisplaySettingsState {
    /// Settings for the active color mode
    pub fn current(&self, is_dark_mode: bool) -> &DisplaySettings {
        if is_dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn current_mut(&mut self, is_dark_mode: bool) -> &mut DisplaySettings {
        if is_dark_mode {
            &mut self.dark
        } else {
            &mut self.light
        }
    }

    pub fn from_yaml(source: &str) -> Result<Self, EncoreError> {
        serde_yaml::from_str(source).map_err(|e| EncoreError::Settings(e.to_string()))
    }

    pub fn from_json(source: &str) -> Result<Self, EncoreError> {
        serde_json::from_str(source).map_err(|e| EncoreError::Settings(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, EncoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, EncoreError> {
        serde_yaml::to_string(self).map_err(|e| EncoreError::Settings(e.to_string()))
    }

    /// Parse a saved settings document, falling back to the defaults when it
    /// is malformed.
    pub fn load_or_default(source: &str) -> Self {
        match Self::from_yaml(source) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "ignoring saved display settings");
                Self::default()
            }
        }
    }
}
