use std::ops::Range;

use super::notes::{is_accidental, is_note_letter};

/// Quality suffixes recognized after a chord root, longest first so that a
/// prefix (`m`) never shadows a longer spelling (`min7`).
pub const CHORD_QUALITIES: [&str; 21] = [
    "major", "minor", "maj7", "min7", "dim7", "aug7", "sus7", "add9", "sus2", "sus4", "maj", "min",
    "dim", "aug", "m7", "11", "13", "M", "m", "7", "9",
];

/// Label that opens the key metadata line.
pub const KEY_LABEL: &str = "**Key:**";

/// Surface form of a chord token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordForm {
    /// Bare chord in running text: `Am7`
    Plain,
    /// Square brackets: `[Am7]`
    Bracketed,
    /// Obsidian-style inline code around brackets: `` `[Am7]` ``
    BacktickBracketed,
}

/// A chord recognized in song text. All ranges are byte offsets into the
/// scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordToken {
    pub form: ChordForm,
    /// Root letter plus accidental
    pub root: Range<usize>,
    /// Quality suffix, empty when absent
    pub quality: Range<usize>,
    /// Bass note of a slash chord
    pub bass: Option<Range<usize>>,
    /// Whole token including delimiters
    pub span: Range<usize>,
}

/// Token produced by [`ChordLexer`]. Text between tokens is not represented;
/// it is copied through verbatim by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Chord(ChordToken),
    /// `**Key:** D Major`: `root` is the key's note, `mode` is `Major`/`Minor`
    Key {
        root: Range<usize>,
        mode: Range<usize>,
        span: Range<usize>,
    },
}

impl Token {
    pub fn span(&self) -> &Range<usize> {
        match self {
            Token::Chord(chord) => &chord.span,
            Token::Key { span, .. } => span,
        }
    }

    /// Byte ranges of the note names this token carries, in source order.
    pub fn note_ranges(&self) -> Vec<Range<usize>> {
        match self {
            Token::Chord(chord) => {
                let mut ranges = vec![chord.root.clone()];
                if let Some(bass) = &chord.bass {
                    ranges.push(bass.clone());
                }
                ranges
            }
            Token::Key { root, .. } => vec![root.clone()],
        }
    }
}

/// Scanner for chord tokens embedded in free-form song text.
///
/// At each position the most specific shape is tried first: key metadata line
/// (only at the start of a line, after optional indentation),
/// backtick-bracketed chord, bracketed chord, then (when enabled) a bare chord
/// word. A matched span is consumed whole, so a looser shape never rematches
/// text a stricter one already claimed.
pub struct ChordLexer<'a> {
    input: &'a str,
    position: usize,
    match_bare_chords: bool,
}

impl<'a> ChordLexer<'a> {
    pub fn new(input: &'a str, match_bare_chords: bool) -> Self {
        Self {
            input,
            position: 0,
            match_bare_chords,
        }
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos..)?.chars().next()
    }

    fn char_before(&self, pos: usize) -> Option<char> {
        self.input.get(..pos)?.chars().next_back()
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(c) = self.char_at(self.position) {
            let start = self.position;

            let token = if self.input[start..].starts_with(KEY_LABEL) && self.at_line_start(start) {
                self.lex_key_line(start)
            } else if c == '`' {
                self.lex_bracketed(start, ChordForm::BacktickBracketed)
            } else if c == '[' {
                self.lex_bracketed(start, ChordForm::Bracketed)
            } else if self.match_bare_chords && is_note_letter(c) && self.at_word_start(start) {
                self.lex_bare(start)
            } else {
                None
            };

            match token {
                Some(token) => {
                    self.position = token.span().end;
                    tokens.push(token);
                }
                None => self.position += c.len_utf8(),
            }
        }

        tokens
    }

    /// Only spaces or tabs precede `pos` on its line.
    fn at_line_start(&self, pos: usize) -> bool {
        self.input[..pos]
            .rsplit('\n')
            .next()
            .map_or(true, |prefix| prefix.chars().all(|c| c == ' ' || c == '\t'))
    }

    fn at_word_start(&self, pos: usize) -> bool {
        !self.char_before(pos).is_some_and(is_word_char)
    }

    /// Candidate end offsets for a note starting at `pos`, with the accidental
    /// taken first and the bare letter as fallback.
    fn note_ends(&self, pos: usize) -> Vec<usize> {
        match self.char_at(pos) {
            Some(letter) if is_note_letter(letter) => {
                let after_letter = pos + letter.len_utf8();
                match self.char_at(after_letter) {
                    Some(acc) if is_accidental(acc) => {
                        vec![after_letter + acc.len_utf8(), after_letter]
                    }
                    _ => vec![after_letter],
                }
            }
            _ => Vec::new(),
        }
    }

    /// Candidate end offsets for a quality suffix starting at `pos`, longest
    /// first, always ending with the empty quality.
    fn quality_ends(&self, pos: usize) -> Vec<usize> {
        let rest = &self.input[pos..];
        let mut ends: Vec<usize> = CHORD_QUALITIES
            .iter()
            .filter(|q| rest.starts_with(*q))
            .map(|q| pos + q.len())
            .collect();
        ends.push(pos);
        ends
    }

    /// `[Root Quality? (/Bass)?]`, optionally wrapped in backticks.
    fn lex_bracketed(&self, start: usize, form: ChordForm) -> Option<Token> {
        let open = match form {
            ChordForm::BacktickBracketed => "`[",
            _ => "[",
        };
        let close = match form {
            ChordForm::BacktickBracketed => "]`",
            _ => "]",
        };
        if !self.input[start..].starts_with(open) {
            return None;
        }

        let root_start = start + open.len();
        for root_end in self.note_ends(root_start) {
            for quality_end in self.quality_ends(root_end) {
                let rest = &self.input[quality_end..];

                if rest.starts_with(close) {
                    return Some(Token::Chord(ChordToken {
                        form,
                        root: root_start..root_end,
                        quality: root_end..quality_end,
                        bass: None,
                        span: start..quality_end + close.len(),
                    }));
                }

                if rest.starts_with('/') {
                    let bass_start = quality_end + 1;
                    for bass_end in self.note_ends(bass_start) {
                        if self.input[bass_end..].starts_with(close) {
                            return Some(Token::Chord(ChordToken {
                                form,
                                root: root_start..root_end,
                                quality: root_end..quality_end,
                                bass: Some(bass_start..bass_end),
                                span: start..bass_end + close.len(),
                            }));
                        }
                    }
                }
            }
        }
        None
    }

    /// Whole-word chord in running text.
    fn lex_bare(&self, start: usize) -> Option<Token> {
        for root_end in self.note_ends(start) {
            for quality_end in self.quality_ends(root_end) {
                let ends_word = !self.char_at(quality_end).is_some_and(is_word_char);
                if ends_word {
                    return Some(Token::Chord(ChordToken {
                        form: ChordForm::Plain,
                        root: start..root_end,
                        quality: root_end..quality_end,
                        bass: None,
                        span: start..quality_end,
                    }));
                }
            }
        }
        None
    }

    /// `**Key:** <Root> <Major|Minor>`
    fn lex_key_line(&self, start: usize) -> Option<Token> {
        let mut pos = start + KEY_LABEL.len();
        while matches!(self.char_at(pos), Some(' ' | '\t')) {
            pos += 1;
        }

        let root_start = pos;
        for root_end in self.note_ends(root_start) {
            let mut mode_start = root_end;
            while matches!(self.char_at(mode_start), Some(' ' | '\t')) {
                mode_start += 1;
            }
            if mode_start == root_end {
                continue;
            }

            let rest = &self.input[mode_start..];
            let Some(mode) = ["Major", "Minor"].into_iter().find(|m| rest.starts_with(m)) else {
                continue;
            };
            let mode_end = mode_start + mode.len();
            if self.char_at(mode_end).is_some_and(is_word_char) {
                continue;
            }

            return Some(Token::Key {
                root: root_start..root_end,
                mode: mode_start..mode_end,
                span: start..mode_end,
            });
        }
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
