use encore::{AppState, Command, DisplaySettings, DisplaySettingsState, EncoreError, TransposeOptions};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Serialize)]
struct BindingError {
    message: String,
}

impl From<EncoreError> for BindingError {
    fn from(e: EncoreError) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for BindingError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

fn to_js_error(e: BindingError) -> JsValue {
    let json = serde_json::to_string(&e).unwrap_or_else(|_| format!("{{\"message\":{:?}}}", e.message));
    JsValue::from_str(&json)
}

fn parse_settings(settings_json: &str) -> Result<DisplaySettings, BindingError> {
    if settings_json.trim().is_empty() {
        return Ok(DisplaySettings::default());
    }
    Ok(serde_json::from_str(settings_json)?)
}

fn render_markup_json(text: &str, settings_json: &str) -> Result<String, BindingError> {
    let settings = parse_settings(settings_json)?;
    Ok(encore::render_markup(text, &settings))
}

fn apply_command_json(state_json: &str, command_json: &str) -> Result<String, BindingError> {
    let mut state: AppState = if state_json.trim().is_empty() {
        AppState::default()
    } else {
        serde_json::from_str(state_json)?
    };
    let command: Command = serde_json::from_str(command_json)?;
    state.apply(command);
    Ok(serde_json::to_string(&state)?)
}

fn export_html_json(state_json: &str, settings_json: &str) -> Result<String, BindingError> {
    let state: AppState = serde_json::from_str(state_json)?;
    let settings = if settings_json.trim().is_empty() {
        DisplaySettingsState::default()
    } else {
        DisplaySettingsState::from_json(settings_json)?
    };
    Ok(encore::export_html(&state, &settings)?)
}

/// Render song text to HTML. `settings_json` is a camelCase DisplaySettings
/// object; missing keys (or an empty string) take the light defaults.
#[wasm_bindgen]
pub fn render_markup(text: &str, settings_json: &str) -> Result<String, JsValue> {
    render_markup_json(text, settings_json).map_err(to_js_error)
}

/// Transpose chords and the key line of `text`
#[wasm_bindgen]
pub fn transpose_text(text: &str, semitones: i32, match_bare_chords: bool) -> String {
    let options = TransposeOptions { match_bare_chords };
    encore::transpose_text_with(text, semitones, &options)
}

#[wasm_bindgen]
pub fn clamp_offset(semitones: i32) -> i32 {
    encore::clamp_offset(semitones)
}

#[wasm_bindgen]
pub fn describe_offset(semitones: i32) -> String {
    encore::describe_offset(semitones)
}

/// Default display settings for one color mode, as a JS object
#[wasm_bindgen]
pub fn default_settings(dark: bool) -> Result<JsValue, JsValue> {
    let settings = if dark {
        DisplaySettings::dark()
    } else {
        DisplaySettings::light()
    };
    serde_wasm_bindgen::to_value(&settings).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply one command to a serialized state and return the new state.
/// An empty `state_json` starts from the initial state.
#[wasm_bindgen]
pub fn apply_command(state_json: &str, command_json: &str) -> Result<String, JsValue> {
    apply_command_json(state_json, command_json).map_err(to_js_error)
}

/// Build the standalone setlist HTML document
#[wasm_bindgen]
pub fn export_html(state_json: &str, settings_json: &str) -> Result<String, JsValue> {
    export_html_json(state_json, settings_json).map_err(to_js_error)
}
