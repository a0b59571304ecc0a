//! The node tree and the event-to-tree builder.
//!
//! A parent node exclusively owns its children; dropping a node tears down
//! the whole subtree. There are no back-references and no sharing, so a
//! finished tree can be queried concurrently from multiple threads.

use super::error::{Error, Mark};
use super::parser::{Event, EventKind, Events};
use super::scanner::ScalarStyle;

/// Maximum container nesting depth accepted by the tree builder.
///
/// The builder is recursive; inputs nested deeper than this fail with a
/// structure error instead of exhausting the stack.
pub const MAX_DEPTH: usize = 512;

/// A YAML node: the unit of the parsed tree.
///
/// Mapping children are `(key, value)` pairs in encounter order. Duplicate
/// keys are preserved; lookups return the first match, so a later duplicate
/// stays in the child list but is unreachable through [`Node::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(String, Node)>),
}

impl Node {
    /// Type name for error messages and the CLI `get-type` command.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Scalar(_) => "str",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "struct",
        }
    }

    /// Scalar text, if this node is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Number of children for containers; `None` for scalars and null.
    pub fn len(&self) -> Option<usize> {
        match self {
            Node::Sequence(items) => Some(items.len()),
            Node::Mapping(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }
}

fn next_event(events: &mut Events) -> Result<Event, Error> {
    match events.next() {
        Some(Ok(event)) => Ok(event),
        Some(Err(e)) => Err(e),
        None => Err(Error::Structure {
            message: "unexpected end of event stream".to_string(),
            mark: Mark::default(),
        }),
    }
}

fn expect(events: &mut Events, kind: EventKind) -> Result<(), Error> {
    let event = next_event(events)?;
    if event.kind != kind {
        return Err(Error::Structure {
            message: format!("unexpected event, expected {:?}", kind),
            mark: event.mark,
        });
    }
    Ok(())
}

/// Consume an event stream start-to-finish and return the root node.
///
/// The first error from any stage aborts the build; whatever partial tree
/// exists is dropped before returning.
pub fn build_tree(events: &mut Events) -> Result<Node, Error> {
    expect(events, EventKind::StreamStart)?;
    expect(events, EventKind::DocumentStart)?;
    let event = next_event(events)?;
    let root = build_node(events, event, 0)?;
    // drain the document/stream end events; a trailing structural error
    // (e.g. content after a scalar document) still fails the parse
    for event in events {
        event?;
    }
    Ok(root)
}

fn build_node(events: &mut Events, event: Event, depth: usize) -> Result<Node, Error> {
    match event.kind {
        EventKind::Scalar { value, style } => {
            // an empty plain scalar is the event form of a missing value
            if value.is_empty() && style == ScalarStyle::Plain {
                Ok(Node::Null)
            } else {
                Ok(Node::Scalar(value))
            }
        }
        EventKind::SequenceStart => {
            check_depth(depth, event.mark)?;
            let mut items = Vec::new();
            loop {
                let event = next_event(events)?;
                if event.kind == EventKind::SequenceEnd {
                    break;
                }
                items.push(build_node(events, event, depth + 1)?);
            }
            Ok(Node::Sequence(items))
        }
        EventKind::MappingStart => {
            check_depth(depth, event.mark)?;
            let mut entries = Vec::new();
            loop {
                let event = next_event(events)?;
                match event.kind {
                    EventKind::MappingEnd => break,
                    EventKind::Scalar { value, .. } => {
                        let value_event = next_event(events)?;
                        let child = build_node(events, value_event, depth + 1)?;
                        entries.push((value, child));
                    }
                    _ => {
                        return Err(Error::Structure {
                            message: "mapping keys must be scalars".to_string(),
                            mark: event.mark,
                        });
                    }
                }
            }
            Ok(Node::Mapping(entries))
        }
        _ => Err(Error::Structure {
            message: "unexpected event in node position".to_string(),
            mark: event.mark,
        }),
    }
}

fn check_depth(depth: usize, mark: Mark) -> Result<(), Error> {
    if depth >= MAX_DEPTH {
        return Err(Error::Structure {
            message: format!("nesting deeper than {} levels", MAX_DEPTH),
            mark,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
