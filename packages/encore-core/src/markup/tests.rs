use super::render_markup;
use crate::settings::DisplaySettings;
use crate::transpose::transpose_text;

fn light() -> DisplaySettings {
    DisplaySettings::light()
}

#[test]
fn test_empty_input() {
    assert_eq!(render_markup("", &light()), "");
    assert_eq!(render_markup("\n\n", &light()), "");
}

#[test]
fn test_paragraph_structure() {
    let two = render_markup("Line one\n\nLine two", &light());
    assert_eq!(two.matches("<p ").count(), 2);
    assert!(!two.contains("<br>"));

    let one = render_markup("Line one\nLine two", &light());
    assert_eq!(
        one,
        "<p class=\"mb-4\" style=\"color: #1e293b\">Line one<br>Line two</p>"
    );
}

#[test]
fn test_crlf_input() {
    assert_eq!(
        render_markup("Line one\r\nLine two", &light()),
        render_markup("Line one\nLine two", &light())
    );
}

#[test]
fn test_main_text_color_follows_mode() {
    let html = render_markup("Words", &DisplaySettings::dark());
    assert!(html.contains("color: #f8fafc"));
}

#[test]
fn test_header_only_line_has_no_paragraph() {
    let html = render_markup("## Verse 1", &light());
    assert!(!html.contains("<p"));
    assert_eq!(
        html,
        "<h2 class=\"text-xl font-bold mb-3 mt-6\"><span class=\"section-verse\" \
style=\"color: #F97316\">Verse 1</span></h2>"
    );
}

#[test]
fn test_headings_never_nested_in_paragraphs() {
    let html = render_markup("# Title\nintro line\n## Chorus\nsing", &light());
    assert!(!html.contains("<p class=\"mb-4\" style=\"color: #1e293b\"><h"));
    assert!(!html.contains("<br><h"));
    assert_eq!(html.matches("<p ").count(), 2);
}

#[test]
fn test_section_colors_per_mode() {
    let text = "## Bridge\nla";
    assert!(render_markup(text, &light()).contains("color: #8B5CF6"));
    assert!(render_markup(text, &DisplaySettings::dark()).contains("color: #A78BFA"));

    let mut custom = light();
    custom.bridge_color = "#000000".to_string();
    assert!(render_markup(text, &custom).contains("section-bridge\" style=\"color: #000000"));
}

#[test]
fn test_unrecognized_section_keeps_plain_heading() {
    let html = render_markup("## Coda", &light());
    assert_eq!(html, "<h2 class=\"text-xl font-bold mb-3 mt-6\">Coda</h2>");
}

#[test]
fn test_chords_visible() {
    let html = render_markup("Hello `[C]` world", &light());
    assert!(html.contains("<code class=\"bg-muted px-1 py-0.5 rounded text-sm font-mono\">[C]</code>"));
}

#[test]
fn test_chords_hidden() {
    let mut settings = light();
    settings.show_chords = false;
    let html = render_markup("Hello ` [C] `world", &settings);
    assert_eq!(html, "<p class=\"mb-4\" style=\"color: #1e293b\">Hello world</p>");

    // Section labels in backticks are not chords.
    let html = render_markup("`[Chorus]`", &settings);
    assert!(html.contains("[Chorus]"));
}

#[test]
fn test_harmony_toggles() {
    let text = "{harmony-high}La la{/harmony-high}";
    let mut settings = light();
    assert!(render_markup(text, &settings).contains("<span class=\"harmony-high\" style=\"color: #2563EB\">La la</span>"));

    settings.show_harmony_high = false;
    assert_eq!(
        render_markup(text, &settings),
        "<p class=\"mb-4\" style=\"color: #1e293b\">La la</p>"
    );

    settings.show_harmony_low = false;
    assert!(render_markup("{harmony}x{/harmony}", &settings)
        .contains("<span class=\"harmony-line\">x</span>"));
}

#[test]
fn test_unbalanced_harmony_is_literal() {
    let html = render_markup("{harmony-high}no end", &light());
    assert!(html.contains("{harmony-high}no end"));
}

#[test]
fn test_key_line_hidden() {
    let mut settings = light();
    settings.show_key = false;
    let html = render_markup("# Song\n**Key:** D Major\nWords", &settings);
    assert!(!html.contains("Key:"));
    assert!(!html.contains("D Major"));
    assert!(html.contains("Words"));
}

#[test]
fn test_key_line_shown_and_transposed() {
    let text = transpose_text("**Key:** D Major\nWords", 2);
    let html = render_markup(&text, &light());
    assert!(html.contains("<strong class=\"font-semibold\">Key:</strong> E Major"));
}

#[test]
fn test_bold_chorus() {
    let mut settings = light();
    settings.bold_chorus = true;
    let html = render_markup("## Chorus\nOh sing\n## Verse\nquiet", &settings);
    assert!(html.contains("<strong class=\"chorus-line\">Oh sing</strong>"));
    assert!(!html.contains("<strong class=\"chorus-line\">quiet</strong>"));

    settings.bold_chorus = false;
    let html = render_markup("## Chorus\nOh sing", &settings);
    assert!(!html.contains("chorus-line"));
}

#[test]
fn test_triple_star_emphasis() {
    let html = render_markup("***x***", &light());
    assert!(html.contains("<em class=\"italic\"><strong class=\"font-semibold\">x</strong></em>"));
    assert!(!html.contains("<em class=\"italic\"><em"));
}

#[test]
fn test_links_and_inline_html_pass_through() {
    let html = render_markup("[chart](https://x.test) <u>under</u>", &light());
    assert!(html.contains("<a href=\"https://x.test\" target=\"_blank\""));
    assert!(html.contains("<u>under</u>"));
}

#[test]
fn test_full_song() {
    let song = "# Amazing Grace\n**Key:** G Major\n\n## Verse 1\n`[G]`Amazing grace, how `[C/G]`sweet\n\n## Chorus\n*softly* now";
    let html = render_markup(song, &light());
    assert!(html.starts_with("<h1 class=\"text-2xl font-bold mb-4 mt-6\">Amazing Grace</h1>\n<p"));
    assert!(html.contains("section-verse"));
    assert!(html.contains("section-chorus"));
    assert!(html.contains("[C/G]</code>sweet"));
    assert!(html.contains("<em class=\"italic\">softly</em> now"));
}
