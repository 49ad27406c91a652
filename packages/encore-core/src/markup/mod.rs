//! # Markup Module
//!
//! Render song text (a small markdown dialect) into an HTML fragment for
//! display.
//!
//! ## Pipeline
//! Stages run in a fixed order; each works on the output of the previous one.
//! 1. Normalize line endings
//! 2. Drop `**Key:**` lines when `show_key` is off
//! 3. Color recognized `## Section` headers
//! 4. Drop `` `[chord]` `` tokens when `show_chords` is off
//! 5. Bold chorus lines when `bold_chorus` is on
//! 6. Headings, bold, italic, inline code
//! 7. Harmony tiers (`{harmony-high}`, `{harmony-low}`, `{harmony}`)
//! 8. Links
//! 9. Paragraph and line break assembly
//!
//! ## Sub-modules
//! - `sections` - Line-level rewrites (key line, headers, chords, chorus)
//! - `inline` - Inline markup replacements
//! - `blocks` - Paragraph assembly
//!
//! Song text is trusted author content: inline HTML in a song is passed
//! through, not escaped.
//!
//! ## Example
//! ```rust
//! use encore::markup::render_markup;
//! use encore::settings::DisplaySettings;
//!
//! let html = render_markup("## Chorus\nSing `[G]`loud", &DisplaySettings::light());
//! assert!(html.starts_with("<h2"));
//! assert!(html.contains("color: #EF4444"));
//! assert!(html.contains("<code"));
//! ```

mod blocks;
mod inline;
mod sections;

#[cfg(test)]
mod tests;

use tracing::trace;

use crate::settings::DisplaySettings;

/// Render song text into an HTML fragment.
///
/// Total over all input: unbalanced markers are left as literal text and
/// empty input yields an empty string.
pub fn render_markup(text: &str, settings: &DisplaySettings) -> String {
    trace!(len = text.len(), "rendering markup");

    let mut html = sections::normalize_line_endings(text);
    if !settings.show_key {
        html = sections::strip_key_lines(&html);
    }
    html = sections::recolor_section_headers(&html, settings);
    if !settings.show_chords {
        html = sections::strip_chords(&html);
    }
    if settings.bold_chorus {
        html = sections::embolden_chorus(&html);
    }

    html = inline::render_headings(&html);
    html = inline::render_emphasis(&html);
    html = inline::render_code(&html);
    html = inline::render_harmony(&html, settings);
    html = inline::render_links(&html);

    blocks::assemble(&html, settings)
}
