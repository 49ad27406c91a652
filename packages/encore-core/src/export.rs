//! # Setlist Export
//!
//! Standalone HTML documents for a whole setlist.
//!
//! An exported file is readable on its own (every song rendered with its
//! current transposition) and also carries the full [`AppState`] as JSON, so
//! [`load_setlist`] can restore it later.
//!
//! ## Embedded State
//! ```html
//! <script type="application/json" id="setlist-data">{"setlistName":...}</script>
//! ```
//! Any `</` inside the JSON is written as `<\/` so song text can never close
//! the script element early.

use quick_xml::escape::escape;
use tracing::{debug, info};

use crate::error::EncoreError;
use crate::markup::render_markup;
use crate::settings::DisplaySettingsState;
use crate::song::{Song, SongSet};
use crate::state::{AppState, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::transpose::{describe_offset, TransposeOptions};

const DATA_OPEN: &str = r#"<script type="application/json" id="setlist-data">"#;
const DATA_CLOSE: &str = "</script>";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 48rem; padding: 2rem 1rem; background: #ffffff; color: #1e293b; }
html.dark body { background: #0f172a; color: #f8fafc; }
.setlist-title { font-size: 2rem; margin-bottom: 0.25rem; }
.export-date { opacity: 0.6; margin-top: 0; }
.set { margin-top: 3rem; }
.set-title { border-bottom: 4px solid var(--set-color); padding-bottom: 0.25rem; }
.set-blue { --set-color: #3b82f6; } .set-green { --set-color: #22c55e; }
.set-purple { --set-color: #a855f7; } .set-orange { --set-color: #f97316; }
.set-red { --set-color: #ef4444; } .set-teal { --set-color: #14b8a6; }
.set-pink { --set-color: #ec4899; } .set-indigo { --set-color: #6366f1; }
.song { margin-top: 2rem; page-break-inside: avoid; }
.song-key { font-size: 0.875rem; opacity: 0.7; }
.harmony-line { font-style: italic; }
code { font-family: ui-monospace, monospace; font-weight: 600; }
"#;

/// File name offered for an exported setlist: characters other than ASCII
/// letters, digits, `_` and whitespace become `_`.
pub fn export_file_name(setlist_name: &str) -> String {
    let stem: String = setlist_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_Setlist.html", stem)
}

fn write_song(html: &mut String, set: &SongSet, song: &Song, settings: &DisplaySettingsState, dark: bool) {
    let content = song.transposed_content(&TransposeOptions::default());
    let body = render_markup(&content, settings.current(dark));

    html.push_str(&format!(
        "<article class=\"song\" id=\"song-{}-{}\">\n",
        set.id, song.id
    ));
    html.push_str(&format!(
        "<h3 class=\"song-title\">{}</h3>\n",
        escape(song.name.as_str())
    ));
    if song.key_transposition != 0 {
        html.push_str(&format!(
            "<p class=\"song-key\">Transposed {}</p>\n",
            describe_offset(song.key_transposition)
        ));
    }
    html.push_str("<div class=\"song-content\">\n");
    html.push_str(&body);
    html.push_str("\n</div>\n</article>\n");
}

/// Build the standalone HTML document for `state`.
///
/// Songs render with the settings for the state's color mode.
pub fn export_html(state: &AppState, settings: &DisplaySettingsState) -> Result<String, EncoreError> {
    let dark = state.is_dark_mode;
    let title = escape(state.setlist_name.as_str());
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    if dark {
        html.push_str("<html lang=\"en\" class=\"dark\">\n");
    } else {
        html.push_str("<html lang=\"en\">\n");
    }
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(&format!("<style>{}</style>\n</head>\n", STYLE));
    html.push_str(&format!(
        "<body style=\"font-size: {}%\">\n",
        state.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    ));

    html.push_str("<header>\n");
    html.push_str(&format!("<h1 class=\"setlist-title\">{}</h1>\n", title));
    if let Some(date) = &state.export_date {
        html.push_str(&format!(
            "<p class=\"export-date\">Exported {}</p>\n",
            escape(date.as_str())
        ));
    }
    html.push_str("</header>\n");

    for set in &state.sets {
        html.push_str(&format!(
            "<section class=\"set set-{}\" id=\"set-{}\">\n",
            set.color.name(),
            set.id
        ));
        html.push_str(&format!(
            "<h2 class=\"set-title\">{}</h2>\n",
            escape(set.name.as_str())
        ));
        for song in &set.songs {
            write_song(&mut html, set, song, settings, dark);
        }
        html.push_str("</section>\n");
        debug!(set = %set.name, songs = set.songs.len(), "exported set");
    }

    let data = serde_json::to_string(state)?.replace("</", "<\\/");
    html.push_str(DATA_OPEN);
    html.push_str(&data);
    html.push_str(DATA_CLOSE);
    html.push_str("\n</body>\n</html>\n");

    info!(
        setlist = %state.setlist_name,
        sets = state.sets.len(),
        bytes = html.len(),
        "exported setlist"
    );
    Ok(html)
}

/// Restore the state embedded in an exported setlist.
///
/// Indices and font size that are out of range are reset rather than
/// rejected; a document without embedded data or without any set is invalid.
pub fn load_setlist(html: &str) -> Result<AppState, EncoreError> {
    let start = html
        .find(DATA_OPEN)
        .map(|pos| pos + DATA_OPEN.len())
        .ok_or_else(|| EncoreError::InvalidSetlist("no embedded setlist data".to_string()))?;
    let len = html[start..]
        .find(DATA_CLOSE)
        .ok_or_else(|| EncoreError::InvalidSetlist("unterminated setlist data".to_string()))?;

    let mut state: AppState = serde_json::from_str(&html[start..start + len])?;
    if state.sets.is_empty() {
        return Err(EncoreError::InvalidSetlist("setlist has no sets".to_string()));
    }

    if state.current_set_index >= state.sets.len() {
        state.current_set_index = 0;
        state.current_song_index = -1;
    }
    let songs = state.sets[state.current_set_index].songs.len();
    if state.selected_index().is_some_and(|index| index >= songs) || state.current_song_index < -1 {
        state.current_song_index = -1;
    }
    state.font_size = state.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);

    info!(setlist = %state.setlist_name, sets = state.sets.len(), "loaded setlist");
    Ok(state)
}
