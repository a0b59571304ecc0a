//! Lexical scanner for YAML input.
//!
//! Converts raw bytes into a lazy, forward-only stream of [`Token`]s. The
//! scanner tracks line/column positions for error reporting and reports raw
//! indentation width per line; the indentation *stack* belongs to the event
//! parser, not here.

use super::error::{Error, Mark};

/// Quoting style of a scalar token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
}

/// Lexical token kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Raw indentation width of a content-bearing line.
    Indent { width: usize },
    /// `-` sequence entry marker (followed by whitespace or end of line).
    Dash,
    /// `:` mapping value marker (followed by whitespace or end of line).
    Colon,
    /// Scalar content, quotes stripped and escapes resolved.
    Scalar { value: String, style: ScalarStyle },
    /// `---` marker line.
    DocumentStart,
    /// `...` marker line.
    DocumentEnd,
    /// End of input. Emitted exactly once.
    StreamEnd,
}

/// A lexical token with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub mark: Mark,
}

/// Pull-based scanner over an in-memory buffer.
///
/// Each parse invocation owns its own scanner; no state is shared across
/// calls. Blank lines and comment-only lines produce no tokens.
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    at_line_start: bool,
    emitted_stream_end: bool,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Scanner {
            input,
            pos: 0,
            line: 0,
            column: 0,
            at_line_start: true,
            emitted_stream_end: false,
            failed: false,
        }
    }

    fn mark(&self) -> Mark {
        Mark::new(self.line, self.column)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Consume one byte, updating the line/column cursor.
    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    /// Is the byte at `offset` a token boundary (blank or end of input)?
    fn blank_at(&self, offset: usize) -> bool {
        matches!(self.peek_at(offset), None | Some(b' ' | b'\t' | b'\r' | b'\n'))
    }

    fn skip_to_line_end(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.bump();
        }
    }

    /// Does the input at the cursor start a `---` or `...` marker line?
    fn at_marker(&self, marker: &[u8]) -> bool {
        self.input[self.pos..].starts_with(marker) && self.blank_at(marker.len())
    }

    fn stream_end_token(&mut self) -> Option<Token> {
        if self.emitted_stream_end {
            return None;
        }
        self.emitted_stream_end = true;
        Some(Token {
            kind: TokenKind::StreamEnd,
            mark: self.mark(),
        })
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        loop {
            if self.at_line_start {
                let mut width = 0;
                loop {
                    match self.peek() {
                        Some(b' ') => {
                            self.bump();
                            width += 1;
                        }
                        Some(b'\t') => {
                            return Err(Error::Scan {
                                message: "tab character used for indentation".to_string(),
                                mark: self.mark(),
                            });
                        }
                        _ => break,
                    }
                }
                match self.peek() {
                    None => return Ok(self.stream_end_token()),
                    Some(b'\n') | Some(b'\r') => {
                        // blank line
                        self.skip_to_line_end();
                        self.bump();
                        continue;
                    }
                    Some(b'#') => {
                        self.skip_to_line_end();
                        continue;
                    }
                    Some(_) => {
                        self.at_line_start = false;
                        if width == 0 {
                            let mark = self.mark();
                            if self.at_marker(b"---") {
                                self.bump();
                                self.bump();
                                self.bump();
                                return Ok(Some(Token {
                                    kind: TokenKind::DocumentStart,
                                    mark,
                                }));
                            }
                            if self.at_marker(b"...") {
                                self.bump();
                                self.bump();
                                self.bump();
                                return Ok(Some(Token {
                                    kind: TokenKind::DocumentEnd,
                                    mark,
                                }));
                            }
                        }
                        return Ok(Some(Token {
                            kind: TokenKind::Indent { width },
                            mark: self.mark(),
                        }));
                    }
                }
            }

            // mid-line: skip inline whitespace
            while matches!(self.peek(), Some(b' ') | Some(b'\t') | Some(b'\r')) {
                self.bump();
            }
            match self.peek() {
                None => return Ok(self.stream_end_token()),
                Some(b'\n') => {
                    self.bump();
                    self.at_line_start = true;
                    continue;
                }
                Some(b'#') => {
                    self.skip_to_line_end();
                    continue;
                }
                Some(b'-') if self.blank_at(1) => {
                    let mark = self.mark();
                    self.bump();
                    return Ok(Some(Token {
                        kind: TokenKind::Dash,
                        mark,
                    }));
                }
                Some(b':') if self.blank_at(1) => {
                    let mark = self.mark();
                    self.bump();
                    return Ok(Some(Token {
                        kind: TokenKind::Colon,
                        mark,
                    }));
                }
                Some(b'"') => return self.scan_double_quoted().map(Some),
                Some(b'\'') => return self.scan_single_quoted().map(Some),
                Some(_) => return self.scan_plain().map(Some),
            }
        }
    }

    /// Plain scalar: runs to `: `, ` #`, end of line, or end of input,
    /// with trailing whitespace trimmed.
    fn scan_plain(&mut self) -> Result<Token, Error> {
        let mark = self.mark();
        let start = self.pos;
        let mut end = self.pos;
        loop {
            match self.peek() {
                None | Some(b'\n') => break,
                Some(b':') if self.blank_at(1) => break,
                Some(b'#') if self.pos > start && is_blank(self.input[self.pos - 1]) => break,
                Some(b) => {
                    self.bump();
                    if !is_blank(b) {
                        end = self.pos;
                    }
                }
            }
        }
        let value = String::from_utf8_lossy(&self.input[start..end]).into_owned();
        Ok(Token {
            kind: TokenKind::Scalar {
                value,
                style: ScalarStyle::Plain,
            },
            mark,
        })
    }

    fn scan_double_quoted(&mut self) -> Result<Token, Error> {
        let open = self.mark();
        self.bump(); // opening quote
        let mut buf: Vec<u8> = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(Error::Scan {
                        message: "unterminated double-quoted scalar".to_string(),
                        mark: open,
                    });
                }
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(b'\\') => {
                    self.bump();
                    let esc = self.bump().ok_or(Error::Scan {
                        message: "unterminated double-quoted scalar".to_string(),
                        mark: open,
                    })?;
                    match esc {
                        b'n' => buf.push(b'\n'),
                        b't' => buf.push(b'\t'),
                        b'r' => buf.push(b'\r'),
                        b'0' => buf.push(b'\0'),
                        other => buf.push(other),
                    }
                }
                Some(b) => {
                    self.bump();
                    buf.push(b);
                }
            }
        }
        Ok(Token {
            kind: TokenKind::Scalar {
                value: String::from_utf8_lossy(&buf).into_owned(),
                style: ScalarStyle::DoubleQuoted,
            },
            mark: open,
        })
    }

    fn scan_single_quoted(&mut self) -> Result<Token, Error> {
        let open = self.mark();
        self.bump(); // opening quote
        let mut buf: Vec<u8> = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(Error::Scan {
                        message: "unterminated single-quoted scalar".to_string(),
                        mark: open,
                    });
                }
                Some(b'\'') => {
                    self.bump();
                    // '' is an escaped quote inside a single-quoted scalar
                    if self.peek() == Some(b'\'') {
                        self.bump();
                        buf.push(b'\'');
                    } else {
                        break;
                    }
                }
                Some(b) => {
                    self.bump();
                    buf.push(b);
                }
            }
        }
        Ok(Token {
            kind: TokenKind::Scalar {
                value: String::from_utf8_lossy(&buf).into_owned(),
                style: ScalarStyle::SingleQuoted,
            },
            mark: open,
        })
    }
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
