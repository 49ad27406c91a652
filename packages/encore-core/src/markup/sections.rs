//! Line-level rewrites that run before inline markup: key line suppression,
//! section header colors, chord stripping and chorus emphasis.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::settings::{DisplaySettings, SectionKind};
use crate::transpose::CHORD_QUALITIES;

#[allow(clippy::expect_used)]
static KEY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\*\*Key:\*\*.*(?:\n|$)").expect("key line regex is valid"));

#[allow(clippy::expect_used)]
static BACKTICK_CHORD: Lazy<Regex> = Lazy::new(|| {
    let qualities = CHORD_QUALITIES.join("|");
    let note = "[A-G][#b♯♭]?";
    Regex::new(&format!(
        r"`[ \t]*\[{note}(?:{qualities})?(?:/{note})?\][ \t]*`"
    ))
    .expect("chord regex is valid")
});

#[allow(clippy::expect_used)]
static STYLED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<span\b[^>]*>(.*)</span>$").expect("span regex is valid"));

/// A markdown heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Heading<'a> {
    pub level: usize,
    /// Visible header text with any wrapping `<span>` removed
    pub title: &'a str,
    pub section: Option<SectionKind>,
}

/// Parse a `#`, `##` or `###` heading line.
///
/// Section kinds are only recognized on `##` headers, the level songs use for
/// their structural parts.
pub(crate) fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    if text.trim().is_empty() {
        return None;
    }

    let title = STYLED_SPAN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str());
    let section = if hashes == 2 {
        SectionKind::from_header(title)
    } else {
        None
    };

    Some(Heading {
        level: hashes,
        title,
        section,
    })
}

pub(crate) fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Remove every `**Key:** ...` metadata line, newline included.
pub(crate) fn strip_key_lines(text: &str) -> String {
    KEY_LINE.replace_all(text, "").into_owned()
}

/// Remove backtick-bracketed chords such as `` `[Am7]` `` as whole units.
pub(crate) fn strip_chords(text: &str) -> String {
    BACKTICK_CHORD.replace_all(text, "").into_owned()
}

/// Give recognized `## Section` headers the color configured for their
/// section type. Header text is left as written.
pub(crate) fn recolor_section_headers(text: &str, settings: &DisplaySettings) -> String {
    text.split('\n')
        .map(|line| match parse_heading(line) {
            Some(Heading {
                level,
                title,
                section: Some(kind),
            }) => format!(
                "{} <span class=\"section-{}\" style=\"color: {}\">{}</span>",
                "#".repeat(level),
                kind.name().to_ascii_lowercase(),
                settings.section_color(kind),
                title
            ),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap each non-blank line of every chorus in a bold container. A chorus
/// runs from its header to the next heading of any level.
pub(crate) fn embolden_chorus(text: &str) -> String {
    let mut in_chorus = false;
    text.split('\n')
        .map(|line| {
            if let Some(heading) = parse_heading(line) {
                in_chorus = heading.section == Some(SectionKind::Chorus);
                line.to_string()
            } else if in_chorus && !line.trim().is_empty() {
                format!("<strong class=\"chorus-line\">{}</strong>", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
