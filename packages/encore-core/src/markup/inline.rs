//! Heading, emphasis, code, harmony and link markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::settings::DisplaySettings;

macro_rules! regex {
    ($name:ident, $pattern:expr) => {
        #[allow(clippy::expect_used)]
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pattern).expect(concat!(stringify!($name), " regex is valid")));
    };
}

regex!(H3, r"(?m)^### (.+)$");
regex!(H2, r"(?m)^## (.+)$");
regex!(H1, r"(?m)^# (.+)$");
regex!(BOLD, r"\*\*([^*]+)\*\*");
regex!(CODE, r"`([^`\n]+)`");
regex!(HARMONY_HIGH, r"(?s)\{harmony-high\}(.*?)\{/harmony-high\}");
regex!(HARMONY_LOW, r"(?s)\{harmony-low\}(.*?)\{/harmony-low\}");
regex!(HARMONY_LEGACY, r"(?s)\{harmony\}(.*?)\{/harmony\}");
regex!(LINK, r"\[([^\]]+)\]\(([^)]+)\)");

pub(crate) fn render_headings(text: &str) -> String {
    let text = H3.replace_all(text, r#"<h3 class="text-lg font-semibold mb-2 mt-4">$1</h3>"#);
    let text = H2.replace_all(&text, r#"<h2 class="text-xl font-bold mb-3 mt-6">$1</h2>"#);
    H1.replace_all(&text, r#"<h1 class="text-2xl font-bold mb-4 mt-6">$1</h1>"#)
        .into_owned()
}

/// Bold first, then italic over what bold left behind.
pub(crate) fn render_emphasis(text: &str) -> String {
    let bolded = BOLD.replace_all(text, r#"<strong class="font-semibold">$1</strong>"#);
    render_italics(&bolded)
}

/// `*x*` becomes `<em>` when neither star touches another star and the body
/// holds no star or line break.
fn render_italics(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        let opens = bytes[i] == b'*' && (i == 0 || bytes[i - 1] != b'*');
        if opens {
            let close = text[i + 1..]
                .find(['*', '\n'])
                .map(|rel| i + 1 + rel)
                .filter(|&close| {
                    bytes[close] == b'*' && close > i + 1 && bytes.get(close + 1) != Some(&b'*')
                });
            if let Some(close) = close {
                out.push_str(&text[last..i]);
                out.push_str(r#"<em class="italic">"#);
                out.push_str(&text[i + 1..close]);
                out.push_str("</em>");
                i = close + 1;
                last = i;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&text[last..]);
    out
}

pub(crate) fn render_code(text: &str) -> String {
    CODE.replace_all(
        text,
        r#"<code class="bg-muted px-1 py-0.5 rounded text-sm font-mono">$1</code>"#,
    )
    .into_owned()
}

fn harmony_tier(text: &str, pattern: &Regex, class: &str, color: Option<&str>, visible: bool) -> String {
    pattern
        .replace_all(text, |caps: &Captures| {
            let inner = &caps[1];
            if !visible {
                return inner.to_string();
            }
            match color {
                Some(color) => format!(
                    "<span class=\"{}\" style=\"color: {}\">{}</span>",
                    class, color, inner
                ),
                None => format!("<span class=\"{}\">{}</span>", class, inner),
            }
        })
        .into_owned()
}

/// Resolve the three harmony tiers. High and low follow their toggles;
/// the legacy `{harmony}` tier is always shown.
pub(crate) fn render_harmony(text: &str, settings: &DisplaySettings) -> String {
    let text = harmony_tier(
        text,
        &HARMONY_HIGH,
        "harmony-high",
        Some(settings.harmony_high_color.as_str()),
        settings.show_harmony_high,
    );
    let text = harmony_tier(
        &text,
        &HARMONY_LOW,
        "harmony-low",
        Some(settings.harmony_low_color.as_str()),
        settings.show_harmony_low,
    );
    harmony_tier(&text, &HARMONY_LEGACY, "harmony-line", None, true)
}

/// Links open in a new browsing context without opener or referrer.
pub(crate) fn render_links(text: &str) -> String {
    LINK.replace_all(
        text,
        r#"<a href="$2" target="_blank" rel="noopener noreferrer" class="text-primary hover:underline">$1</a>"#,
    )
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(
            render_headings("# T\n## S\n### N\n#### X"),
            "<h1 class=\"text-2xl font-bold mb-4 mt-6\">T</h1>\n\
<h2 class=\"text-xl font-bold mb-3 mt-6\">S</h2>\n\
<h3 class=\"text-lg font-semibold mb-2 mt-4\">N</h3>\n#### X"
        );
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            render_emphasis("**Key:** D and *soft*"),
            "<strong class=\"font-semibold\">Key:</strong> D and <em class=\"italic\">soft</em>"
        );
    }

    #[test]
    fn test_triple_stars_not_double_wrapped() {
        assert_eq!(
            render_emphasis("***x***"),
            "<em class=\"italic\"><strong class=\"font-semibold\">x</strong></em>"
        );
    }

    #[test]
    fn test_italic_requires_closing_on_same_line() {
        assert_eq!(render_italics("*open\nclose*"), "*open\nclose*");
        assert_eq!(render_italics("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(render_italics("a **"), "a **");
        assert_eq!(render_italics("*a* *b*"), "<em class=\"italic\">a</em> <em class=\"italic\">b</em>");
    }

    #[test]
    fn test_code() {
        assert_eq!(
            render_code("`[Am]` x"),
            "<code class=\"bg-muted px-1 py-0.5 rounded text-sm font-mono\">[Am]</code> x"
        );
    }

    #[test]
    fn test_harmony_tiers() {
        let mut settings = DisplaySettings::light();
        let text = "{harmony-high}La\nla{/harmony-high} {harmony-low}Oo{/harmony-low} {harmony}Ah{/harmony}";
        assert_eq!(
            render_harmony(text, &settings),
            "<span class=\"harmony-high\" style=\"color: #2563EB\">La\nla</span> \
<span class=\"harmony-low\" style=\"color: #059669\">Oo</span> \
<span class=\"harmony-line\">Ah</span>"
        );

        settings.show_harmony_high = false;
        settings.show_harmony_low = false;
        assert_eq!(
            render_harmony(text, &settings),
            "La\nla Oo <span class=\"harmony-line\">Ah</span>"
        );
    }

    #[test]
    fn test_unbalanced_harmony_left_literal() {
        let settings = DisplaySettings::light();
        assert_eq!(
            render_harmony("{harmony-high}never closed", &settings),
            "{harmony-high}never closed"
        );
        assert_eq!(
            render_harmony("{harmony-low}mixed{/harmony-high}", &settings),
            "{harmony-low}mixed{/harmony-high}"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            render_links("[chart](https://x.test/a)"),
            "<a href=\"https://x.test/a\" target=\"_blank\" rel=\"noopener noreferrer\" \
class=\"text-primary hover:underline\">chart</a>"
        );
    }
}
