//! YAML subset parsing and querying.
//!
//! Parsing is a pull-based pipeline: [`scanner::Scanner`] turns bytes into
//! tokens, [`parser::Events`] turns tokens into structural events, and
//! [`tree::build_tree`] assembles the event stream into one [`Node`] tree.
//! Each stage advances only as far as its consumer requires; the first error
//! from any stage aborts the whole parse.
//!
//! Each parse call owns its own pipeline state, so concurrent parses of
//! independent inputs need no locking, and a finished tree is immutable and
//! safe to query from multiple threads.
//!
//! # Module Organization
//!
//! - [`error`]: Error types with input positions
//! - [`scanner`]: Lexical scanning (bytes to tokens)
//! - [`parser`]: Event parsing (tokens to structural events)
//! - [`tree`]: Node tree and the event-to-tree builder
//! - [`query`]: Typed accessors with default fallback
//! - [`path`]: Dot-notation navigation for the CLI
//! - [`serialize`]: Tree-to-YAML output

mod error;
pub mod parser;
mod path;
mod query;
pub mod scanner;
mod serialize;
mod tree;

use std::fs;
use std::path::Path;

pub use error::{Error, Mark};
pub use parser::{Event, EventKind, Events};
pub use scanner::ScalarStyle;
pub use tree::{Node, MAX_DEPTH};

pub use path::{get_at_path, resolve_index, split_path};
pub use serialize::{serialize, serialize_raw};

/// Parse one YAML document from an in-memory buffer.
///
/// Empty input (or comments/blank lines only) yields a [`Node::Null`] root.
pub fn parse_buffer(input: &[u8]) -> Result<Node, Error> {
    tree::build_tree(&mut Events::new(input))
}

/// Parse one YAML document from a string.
pub fn parse_str(input: &str) -> Result<Node, Error> {
    parse_buffer(input.as_bytes())
}

/// Read a file and parse it into a tree.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Node, Error> {
    let input = fs::read(path.as_ref()).map_err(|e| {
        Error::Io(format!(
            "Failed to read '{}': {}",
            path.as_ref().display(),
            e
        ))
    })?;
    parse_buffer(&input)
}
