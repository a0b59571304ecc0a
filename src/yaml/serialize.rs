//! Serialization utilities for node trees.
//!
//! Emits block-style YAML that parses back to a structurally equal tree.
//! Scalars stay plain unless quoting is required to survive a round trip.

use super::tree::Node;

/// Serialize a tree to YAML text.
///
/// A null root serializes to the empty document.
pub fn serialize(node: &Node) -> String {
    match node {
        Node::Null => String::new(),
        Node::Scalar(s) => format!("{}\n", quote_scalar(s)),
        _ => {
            let mut out = String::new();
            emit_block(node, 0, &mut out);
            out
        }
    }
}

/// Serialize to raw string (without YAML formatting).
///
/// Scalars print unquoted, null prints as empty; complex types fall back to
/// YAML output.
pub fn serialize_raw(node: &Node) -> String {
    match node {
        Node::Null => String::new(),
        Node::Scalar(s) => s.clone(),
        _ => serialize(node),
    }
}

fn emit_block(node: &Node, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match node {
        Node::Mapping(entries) => {
            for (key, value) in entries {
                out.push_str(&pad);
                out.push_str(&quote_scalar(key));
                out.push(':');
                emit_value(value, indent, out);
            }
        }
        Node::Sequence(items) => {
            for item in items {
                out.push_str(&pad);
                out.push('-');
                emit_value(item, indent, out);
            }
        }
        _ => {}
    }
}

/// Emit what follows a `key:` or `-` already written to `out`.
fn emit_value(value: &Node, indent: usize, out: &mut String) {
    match value {
        Node::Null => out.push('\n'),
        Node::Scalar(s) => {
            out.push(' ');
            out.push_str(&quote_scalar(s));
            out.push('\n');
        }
        // empty containers have no block-style form
        Node::Sequence(items) if items.is_empty() => out.push_str(" []\n"),
        Node::Mapping(entries) if entries.is_empty() => out.push_str(" {}\n"),
        container => {
            out.push('\n');
            emit_block(container, indent + 1, out);
        }
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.starts_with([' ', '"', '\'', '#', '&', '*', '!', '|', '>', '%', '@', '`'])
        || s.ends_with(' ')
        || s.contains(['\n', '\t', '\r', '\0'])
        || s.contains(": ")
        || s.ends_with(':')
        || s.contains(" #")
        || s == "-"
        || s.starts_with("- ")
        || s == "---"
        || s.starts_with("--- ")
        || s == "..."
        || s.starts_with("... ")
}

fn quote_scalar(s: &str) -> String {
    if !needs_quotes(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
