use crate::foundation::error::{MdlError, MdlResult};

/// 1-based source position of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Keyword(Keyword),
    Word(String),
    Number(f64),
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Keyword(k) => format!("keyword '{}'", k.as_str()),
            Self::Word(w) => format!("'{w}'"),
            Self::Number(v) => format!("number {v}"),
            Self::Eof => "end of input".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Frames,
    Basename,
    Vary,
    Box,
    Sphere,
    Torus,
    Line,
    Move,
    Scale,
    Rotate,
    Push,
    Pop,
    Display,
    Save,
    Constants,
}

impl Keyword {
    const ALL: [Keyword; 15] = [
        Self::Frames,
        Self::Basename,
        Self::Vary,
        Self::Box,
        Self::Sphere,
        Self::Torus,
        Self::Line,
        Self::Move,
        Self::Scale,
        Self::Rotate,
        Self::Push,
        Self::Pop,
        Self::Display,
        Self::Save,
        Self::Constants,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Frames => "frames",
            Self::Basename => "basename",
            Self::Vary => "vary",
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Torus => "torus",
            Self::Line => "line",
            Self::Move => "move",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Display => "display",
            Self::Save => "save",
            Self::Constants => "constants",
        }
    }

    fn from_word(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

fn looks_numeric(word: &str) -> bool {
    let mut chars = word.chars();
    let first = chars.next();
    let second = chars.next();
    let third = chars.next();
    match first {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => second.is_some_and(|c| c.is_ascii_digit()),
        Some('-' | '+') => match second {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => third.is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        },
        _ => false,
    }
}

/// Split a script into tokens. Newlines are plain whitespace; `//` starts a comment.
pub(crate) fn lex(input: &str) -> MdlResult<Vec<Token>> {
    let mut out = Vec::new();

    for (line_idx, raw_line) in input.lines().enumerate() {
        let line = match raw_line.find("//") {
            Some(cut) => &raw_line[..cut],
            None => raw_line,
        };

        let mut chars = line.char_indices().peekable();
        while let Some(&(start, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }

            let mut end = start;
            while let Some(&(i, ch)) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                end = i + ch.len_utf8();
                chars.next();
            }

            let text = &line[start..end];
            let span = Span {
                line: line_idx + 1,
                column: line[..start].chars().count() + 1,
            };

            let kind = if looks_numeric(text) {
                let v: f64 = text
                    .parse()
                    .map_err(|_| MdlError::parse(format!("invalid number '{text}' at {span}")))?;
                TokenKind::Number(v)
            } else if let Some(k) = Keyword::from_word(text) {
                TokenKind::Keyword(k)
            } else {
                TokenKind::Word(text.to_owned())
            };
            out.push(Token { kind, span });
        }
    }

    let last_line = input.lines().count().max(1);
    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            line: last_line,
            column: 1,
        },
    });

    Ok(out)
}
