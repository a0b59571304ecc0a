//! Event parser: converts the scanner's token stream into structural events.
//!
//! Block structure is recovered from indentation with an explicit stack of
//! open frames, one per container. A width greater than the top frame opens
//! a nested container, an equal width continues siblings, and a smaller
//! width pops frames until an exactly matching one is found. A width that
//! matches no open frame is an indentation error.
//!
//! Exactly one document per input: a leading `---` is consumed, and a `...`
//! marker or a second `---` ends the document early. End of input closes all
//! open frames implicitly.

use std::collections::VecDeque;

use super::error::{Error, Mark};
use super::scanner::{ScalarStyle, Scanner, Token, TokenKind};

/// Structural event kinds.
///
/// Nesting is implicit in the start/end pairing: every start event has
/// exactly one matching end event, strictly well-nested.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar { value: String, style: ScalarStyle },
}

/// A structural event with the position it was detected at.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub mark: Mark,
}

impl Event {
    fn new(kind: EventKind, mark: Mark) -> Self {
        Event { kind, mark }
    }

    /// An empty plain scalar, the event form of a missing value.
    fn null_scalar(mark: Mark) -> Self {
        Event::new(
            EventKind::Scalar {
                value: String::new(),
                style: ScalarStyle::Plain,
            },
            mark,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameKind {
    Mapping,
    Sequence,
}

impl FrameKind {
    fn end_event(self) -> EventKind {
        match self {
            FrameKind::Mapping => EventKind::MappingEnd,
            FrameKind::Sequence => EventKind::SequenceEnd,
        }
    }
}

/// One open container: its indentation width and kind.
#[derive(Debug, Clone, Copy)]
struct Frame {
    width: usize,
    kind: FrameKind,
}

/// Lazy event iterator over a token stream.
///
/// Pull-based: tokens are consumed only as far as needed to produce the next
/// event, so a consumer may stop early (e.g. on the first error).
pub struct Events<'a> {
    scanner: Scanner<'a>,
    lookahead: VecDeque<Token>,
    queue: VecDeque<Event>,
    frames: Vec<Frame>,
    started: bool,
    doc_started: bool,
    /// A `key:` or `-` was consumed with nothing after it on the line; the
    /// value arrives on a later line or defaults to null.
    pending_value: Option<Mark>,
    /// The document root was a bare scalar; any further content is an error.
    root_done: bool,
    finished: bool,
    failed: bool,
}

impl<'a> Events<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Events {
            scanner: Scanner::new(input),
            lookahead: VecDeque::new(),
            queue: VecDeque::new(),
            frames: Vec::new(),
            started: false,
            doc_started: false,
            pending_value: None,
            root_done: false,
            finished: false,
            failed: false,
        }
    }

    // -------------------------------------------------------------------------
    // Token access
    // -------------------------------------------------------------------------

    fn fill(&mut self, n: usize) -> Result<(), Error> {
        while self.lookahead.len() < n {
            match self.scanner.next() {
                Some(Ok(token)) => self.lookahead.push_back(token),
                Some(Err(e)) => return Err(e),
                None => break,
            }
        }
        Ok(())
    }

    fn peek_kind(&mut self, idx: usize) -> Result<Option<&TokenKind>, Error> {
        self.fill(idx + 1)?;
        Ok(self.lookahead.get(idx).map(|t| &t.kind))
    }

    fn take(&mut self) -> Result<Option<Token>, Error> {
        self.fill(1)?;
        Ok(self.lookahead.pop_front())
    }

    /// Is the next token still part of the current line?
    fn line_continues(&mut self) -> Result<bool, Error> {
        Ok(!matches!(
            self.peek_kind(0)?,
            None | Some(
                TokenKind::Indent { .. }
                    | TokenKind::StreamEnd
                    | TokenKind::DocumentStart
                    | TokenKind::DocumentEnd
            )
        ))
    }

    // -------------------------------------------------------------------------
    // Event production
    // -------------------------------------------------------------------------

    /// Consume one token and queue the events it implies. Progress is
    /// guaranteed: every call consumes at least one token once the stream
    /// start has been emitted.
    fn step(&mut self) -> Result<(), Error> {
        if !self.started {
            self.started = true;
            self.queue
                .push_back(Event::new(EventKind::StreamStart, Mark::default()));
            return Ok(());
        }

        let Some(token) = self.take()? else {
            // the scanner always terminates with a StreamEnd token, so this
            // only fires on an already-drained stream
            self.finish_document(Mark::default());
            return Ok(());
        };

        match token.kind {
            TokenKind::StreamEnd | TokenKind::DocumentEnd => {
                self.finish_document(token.mark);
                Ok(())
            }
            TokenKind::DocumentStart => {
                if self.doc_started {
                    // one document per stream; a second "---" ends parsing
                    self.finish_document(token.mark);
                    return Ok(());
                }
                // content on the marker line itself ("--- value")
                if self.line_continues()? {
                    return self.handle_line(0, token.mark);
                }
                Ok(())
            }
            TokenKind::Indent { width } => self.handle_line(width, token.mark),
            TokenKind::Dash | TokenKind::Colon | TokenKind::Scalar { .. } => {
                Err(Error::UnexpectedToken {
                    message: "unexpected content".to_string(),
                    mark: token.mark,
                })
            }
        }
    }

    /// Close every open structure and emit document/stream end events.
    fn finish_document(&mut self, mark: Mark) {
        if self.finished {
            return;
        }
        if !self.doc_started {
            // empty document: a null root
            self.queue
                .push_back(Event::new(EventKind::DocumentStart, mark));
            self.queue.push_back(Event::null_scalar(mark));
        } else {
            if let Some(pending) = self.pending_value.take() {
                self.queue.push_back(Event::null_scalar(pending));
            }
            while let Some(frame) = self.frames.pop() {
                self.queue.push_back(Event::new(frame.kind.end_event(), mark));
            }
        }
        self.queue.push_back(Event::new(EventKind::DocumentEnd, mark));
        self.queue.push_back(Event::new(EventKind::StreamEnd, mark));
        self.finished = true;
    }

    /// Dispatch one content-bearing line given its indentation width.
    fn handle_line(&mut self, width: usize, mark: Mark) -> Result<(), Error> {
        if !self.doc_started {
            self.doc_started = true;
            self.queue
                .push_back(Event::new(EventKind::DocumentStart, mark));
        }
        if self.root_done {
            return Err(Error::UnexpectedToken {
                message: "content found after the end of the root node".to_string(),
                mark,
            });
        }

        if let Some(pending) = self.pending_value {
            let top_width = self.frames.last().map(|f| f.width).unwrap_or(0);
            if width > top_width {
                // the pending value is a nested container on this line
                self.pending_value = None;
                return self.open_container(width, mark);
            }
            // value defaults to null; this line is a sibling or an ancestor
            self.pending_value = None;
            self.queue.push_back(Event::null_scalar(pending));
        }

        if self.frames.is_empty() {
            return self.open_root(width, mark);
        }

        // pop frames until one matches this width exactly
        let kind = loop {
            match self.frames.last() {
                None => {
                    return Err(Error::Indentation {
                        message: "indentation does not match any open block".to_string(),
                        mark,
                    });
                }
                Some(top) if width == top.width => break top.kind,
                Some(top) if width > top.width => {
                    return Err(Error::Indentation {
                        message: "indentation does not match any open block".to_string(),
                        mark,
                    });
                }
                Some(_) => {
                    if let Some(frame) = self.frames.pop() {
                        self.queue.push_back(Event::new(frame.kind.end_event(), mark));
                    }
                }
            }
        };

        match kind {
            FrameKind::Mapping => self.handle_mapping_entry(mark),
            FrameKind::Sequence => self.handle_sequence_entry(mark),
        }
    }

    /// First content line of the document: open the root container, or emit
    /// a bare scalar root.
    fn open_root(&mut self, width: usize, mark: Mark) -> Result<(), Error> {
        match self.peek_kind(0)? {
            Some(TokenKind::Dash) => {
                self.frames.push(Frame {
                    width,
                    kind: FrameKind::Sequence,
                });
                self.queue
                    .push_back(Event::new(EventKind::SequenceStart, mark));
                self.handle_sequence_entry(mark)
            }
            Some(TokenKind::Scalar { .. }) => {
                if matches!(self.peek_kind(1)?, Some(TokenKind::Colon)) {
                    self.frames.push(Frame {
                        width,
                        kind: FrameKind::Mapping,
                    });
                    self.queue
                        .push_back(Event::new(EventKind::MappingStart, mark));
                    return self.handle_mapping_entry(mark);
                }
                // bare scalar document
                let Some(token) = self.take()? else {
                    return Ok(());
                };
                if let TokenKind::Scalar { value, style } = token.kind {
                    self.queue
                        .push_back(Event::new(EventKind::Scalar { value, style }, token.mark));
                }
                self.root_done = true;
                if self.line_continues()? {
                    return Err(Error::UnexpectedToken {
                        message: "unexpected content after scalar document".to_string(),
                        mark: self.lookahead[0].mark,
                    });
                }
                Ok(())
            }
            Some(TokenKind::Colon) => Err(Error::UnexpectedToken {
                message: "mapping value marker without a key".to_string(),
                mark,
            }),
            _ => Err(Error::UnexpectedToken {
                message: "expected document content".to_string(),
                mark,
            }),
        }
    }

    /// A deeper-indented line in value position: open the nested container.
    fn open_container(&mut self, width: usize, mark: Mark) -> Result<(), Error> {
        match self.peek_kind(0)? {
            Some(TokenKind::Dash) => {
                self.frames.push(Frame {
                    width,
                    kind: FrameKind::Sequence,
                });
                self.queue
                    .push_back(Event::new(EventKind::SequenceStart, mark));
                self.handle_sequence_entry(mark)
            }
            Some(TokenKind::Scalar { .. }) => {
                if matches!(self.peek_kind(1)?, Some(TokenKind::Colon)) {
                    self.frames.push(Frame {
                        width,
                        kind: FrameKind::Mapping,
                    });
                    self.queue
                        .push_back(Event::new(EventKind::MappingStart, mark));
                    return self.handle_mapping_entry(mark);
                }
                // a lone deeper scalar where a container was expected
                Err(Error::UnexpectedToken {
                    message: "scalar found where a block mapping or sequence was expected"
                        .to_string(),
                    mark,
                })
            }
            Some(TokenKind::Colon) => Err(Error::UnexpectedToken {
                message: "mapping value marker without a key".to_string(),
                mark,
            }),
            _ => Err(Error::UnexpectedToken {
                message: "expected a nested block".to_string(),
                mark,
            }),
        }
    }

    /// One `key: ...` entry in the current mapping frame.
    fn handle_mapping_entry(&mut self, mark: Mark) -> Result<(), Error> {
        let Some(token) = self.take()? else {
            return Ok(());
        };
        match token.kind {
            TokenKind::Scalar { value, style } => {
                if !matches!(self.peek_kind(0)?, Some(TokenKind::Colon)) {
                    return Err(Error::UnexpectedToken {
                        message: format!("expected ':' after mapping key '{}'", value),
                        mark: token.mark,
                    });
                }
                self.queue
                    .push_back(Event::new(EventKind::Scalar { value, style }, token.mark));
                let colon = self.take()?.map(|t| t.mark).unwrap_or(token.mark);
                self.handle_value_rest_of_line(colon)
            }
            TokenKind::Dash => Err(Error::UnexpectedToken {
                message: "expected mapping key, found '-'".to_string(),
                mark: token.mark,
            }),
            TokenKind::Colon => Err(Error::UnexpectedToken {
                message: "mapping value marker without a key".to_string(),
                mark: token.mark,
            }),
            _ => Err(Error::UnexpectedToken {
                message: "expected mapping key".to_string(),
                mark,
            }),
        }
    }

    /// What follows `key:` on the same line: an inline scalar value, or
    /// nothing, leaving the value pending for the next line.
    fn handle_value_rest_of_line(&mut self, colon_mark: Mark) -> Result<(), Error> {
        match self.peek_kind(0)? {
            Some(TokenKind::Scalar { .. }) => {
                let Some(token) = self.take()? else {
                    return Ok(());
                };
                let mark = token.mark;
                if let TokenKind::Scalar { value, style } = token.kind {
                    self.queue
                        .push_back(Event::new(EventKind::Scalar { value, style }, mark));
                }
                if self.line_continues()? {
                    return Err(Error::UnexpectedToken {
                        message: "unexpected content after mapping value".to_string(),
                        mark: self.lookahead[0].mark,
                    });
                }
                Ok(())
            }
            Some(TokenKind::Dash) => Err(Error::UnexpectedToken {
                message: "sequence entries are not allowed on the same line as a mapping key"
                    .to_string(),
                mark: self.lookahead[0].mark,
            }),
            Some(TokenKind::Colon) => Err(Error::UnexpectedToken {
                message: "mapping value marker without a key".to_string(),
                mark: self.lookahead[0].mark,
            }),
            _ => {
                self.pending_value = Some(colon_mark);
                Ok(())
            }
        }
    }

    /// One `- ...` entry in the current sequence frame.
    fn handle_sequence_entry(&mut self, mark: Mark) -> Result<(), Error> {
        let Some(token) = self.take()? else {
            return Ok(());
        };
        match token.kind {
            TokenKind::Dash => self.handle_item_after_dash(token.mark),
            TokenKind::Scalar { .. } => Err(Error::UnexpectedToken {
                message: "expected '-' sequence entry".to_string(),
                mark: token.mark,
            }),
            _ => Err(Error::UnexpectedToken {
                message: "expected '-' sequence entry".to_string(),
                mark,
            }),
        }
    }

    /// What follows `- ` on the same line: a scalar item, a compact mapping
    /// (`- key: value`), a compact nested sequence (`- - item`), or nothing,
    /// leaving the item pending for the next line.
    fn handle_item_after_dash(&mut self, dash_mark: Mark) -> Result<(), Error> {
        match self.peek_kind(0)? {
            Some(TokenKind::Scalar { .. }) => {
                let Some(token) = self.take()? else {
                    return Ok(());
                };
                let scalar_mark = token.mark;
                let TokenKind::Scalar { value, style } = token.kind else {
                    return Ok(());
                };
                if matches!(self.peek_kind(0)?, Some(TokenKind::Colon)) {
                    // compact mapping anchored at the key's column
                    self.frames.push(Frame {
                        width: scalar_mark.column,
                        kind: FrameKind::Mapping,
                    });
                    self.queue
                        .push_back(Event::new(EventKind::MappingStart, scalar_mark));
                    self.queue.push_back(Event::new(
                        EventKind::Scalar { value, style },
                        scalar_mark,
                    ));
                    let colon = self.take()?.map(|t| t.mark).unwrap_or(scalar_mark);
                    return self.handle_value_rest_of_line(colon);
                }
                self.queue
                    .push_back(Event::new(EventKind::Scalar { value, style }, scalar_mark));
                if self.line_continues()? {
                    return Err(Error::UnexpectedToken {
                        message: "unexpected content after sequence item".to_string(),
                        mark: self.lookahead[0].mark,
                    });
                }
                Ok(())
            }
            Some(TokenKind::Dash) => {
                // compact nested sequence anchored at the inner dash
                let Some(token) = self.take()? else {
                    return Ok(());
                };
                self.frames.push(Frame {
                    width: token.mark.column,
                    kind: FrameKind::Sequence,
                });
                self.queue
                    .push_back(Event::new(EventKind::SequenceStart, token.mark));
                self.handle_item_after_dash(token.mark)
            }
            Some(TokenKind::Colon) => Err(Error::UnexpectedToken {
                message: "mapping value marker without a key".to_string(),
                mark: self.lookahead[0].mark,
            }),
            _ => {
                self.pending_value = Some(dash_mark);
                Ok(())
            }
        }
    }
}

impl<'a> Iterator for Events<'a> {
    type Item = Result<Event, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.step() {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
