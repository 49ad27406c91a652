//! Paragraph assembly over already-rendered lines.

use crate::settings::DisplaySettings;

/// True for a line holding exactly one rendered `<h1>`..`<h6>` element.
fn is_heading_line(line: &str) -> bool {
    let line = line.trim();
    let bytes = line.as_bytes();
    if bytes.len() < 9 || !line.starts_with("<h") {
        return false;
    }
    let level = bytes[2];
    if !(b'1'..=b'6').contains(&level) || !matches!(bytes[3], b' ' | b'>') {
        return false;
    }
    let close = format!("</h{}>", level as char);
    line.ends_with(&close) && line.matches(&close).count() == 1
}

/// Group lines into blocks. Blank lines separate paragraphs, single newlines
/// become `<br>`, and heading lines stand on their own outside any paragraph.
/// Empty paragraphs are never emitted.
pub(crate) fn assemble(text: &str, settings: &DisplaySettings) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    let flush = |paragraph: &mut Vec<&str>, blocks: &mut Vec<String>| {
        if paragraph.is_empty() {
            return;
        }
        blocks.push(format!(
            "<p class=\"mb-4\" style=\"color: {}\">{}</p>",
            settings.main_text_color,
            paragraph.join("<br>")
        ));
        paragraph.clear();
    };

    for line in text.split('\n') {
        if line.trim().is_empty() {
            flush(&mut paragraph, &mut blocks);
        } else if is_heading_line(line) {
            flush(&mut paragraph, &mut blocks);
            blocks.push(line.trim().to_string());
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut paragraph, &mut blocks);

    blocks.join("\n")
}
