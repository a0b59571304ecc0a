//! Path handling for tree navigation.
//!
//! The CLI addresses nodes with dot-notation paths ("app.ports.0"). This is
//! a convenience layer over [`Node::get`]/[`Node::at`]; unlike those, a miss
//! here is a path error with a message naming the full path.

use super::error::Error;
use super::tree::Node;

/// Split a dot-notation path into its components.
///
/// `\.` escapes a literal dot and `\\` a literal backslash, so `a.b\.c.d`
/// becomes `["a", "b.c", "d"]`. A trailing lone backslash is dropped.
pub fn split_path(path: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '.' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

/// Resolve a string index to an actual index in a sequence of `len`
/// elements. Negative indices count from the end (-1 is the last element).
pub fn resolve_index(part: &str, len: usize, full_path: &str) -> Result<usize, Error> {
    let idx: i64 = part.parse().map_err(|_| {
        Error::Path(format!(
            "invalid path '{}', non-integer index '{}' provided on a sequence.",
            full_path, part
        ))
    })?;

    let resolved = if idx < 0 { len as i64 + idx } else { idx };
    if resolved < 0 || resolved >= len as i64 {
        return Err(Error::Path(format!(
            "invalid path '{}', index {} is out of range ({} elements in sequence).",
            full_path, idx, len
        )));
    }

    Ok(resolved as usize)
}

/// Navigate from `node` along a dot-notation path.
///
/// `None` returns the node itself.
pub fn get_at_path<'a>(node: &'a Node, path: Option<&str>) -> Result<&'a Node, Error> {
    let path = match path {
        None => return Ok(node),
        Some(p) => p,
    };

    let mut current = node;
    for part in &split_path(path) {
        current = match current {
            Node::Mapping(_) => current.get(part).ok_or_else(|| {
                Error::Path(format!(
                    "invalid path '{}', missing key '{}' in struct.",
                    path, part
                ))
            })?,
            Node::Sequence(items) => {
                let idx = resolve_index(part, items.len(), path)?;
                &items[idx]
            }
            _ => {
                return Err(Error::Path(format!(
                    "invalid path '{}', cannot traverse scalar at '{}'.",
                    path, part
                )));
            }
        };
    }

    Ok(current)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_simple() {
        assert_eq!(split_path("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(split_path("foo"), vec!["foo"]);
    }

    #[test]
    fn test_split_path_escapes() {
        assert_eq!(split_path(r"a\.b.c"), vec!["a.b", "c"]);
        assert_eq!(split_path(r"a\\b.c"), vec!["a\\b", "c"]);
        assert_eq!(split_path(r"a\\.b"), vec!["a\\", "b"]);
    }

    #[test]
    fn test_split_path_empty_elements() {
        assert_eq!(split_path(""), vec![""]);
        assert_eq!(split_path("a..b"), vec!["a", "", "b"]);
        assert_eq!(split_path(".a"), vec!["", "a"]);
    }

    #[test]
    fn test_resolve_index_positive() {
        assert_eq!(resolve_index("0", 3, "test").unwrap(), 0);
        assert_eq!(resolve_index("2", 3, "test").unwrap(), 2);
    }

    #[test]
    fn test_resolve_index_negative() {
        assert_eq!(resolve_index("-1", 3, "test").unwrap(), 2);
        assert_eq!(resolve_index("-3", 3, "test").unwrap(), 0);
    }

    #[test]
    fn test_resolve_index_out_of_range() {
        let err = resolve_index("3", 3, "items.3").unwrap_err();
        match err {
            Error::Path(msg) => {
                assert!(msg.contains("index 3 is out of range"));
                assert!(msg.contains("3 elements"));
            }
            _ => panic!("Expected Error::Path"),
        }
        assert!(resolve_index("-4", 3, "items.-4").is_err());
    }

    #[test]
    fn test_resolve_index_non_integer() {
        let err = resolve_index("foo", 3, "items.foo").unwrap_err();
        match err {
            Error::Path(msg) => assert!(msg.contains("non-integer index 'foo'")),
            _ => panic!("Expected Error::Path"),
        }
    }

    #[test]
    fn test_get_at_path() {
        let tree = Node::Mapping(vec![(
            "app".to_string(),
            Node::Mapping(vec![(
                "ports".to_string(),
                Node::Sequence(vec![
                    Node::Scalar("8080".to_string()),
                    Node::Scalar("9090".to_string()),
                ]),
            )]),
        )]);
        assert_eq!(
            get_at_path(&tree, Some("app.ports.0")).unwrap(),
            &Node::Scalar("8080".to_string())
        );
        assert_eq!(
            get_at_path(&tree, Some("app.ports.-1")).unwrap(),
            &Node::Scalar("9090".to_string())
        );
        assert_eq!(get_at_path(&tree, None).unwrap(), &tree);
    }

    #[test]
    fn test_get_at_path_missing_key() {
        let tree = Node::Mapping(vec![("a".to_string(), Node::Null)]);
        let err = get_at_path(&tree, Some("a.b")).unwrap_err();
        match err {
            Error::Path(msg) => assert!(msg.contains("cannot traverse scalar")),
            _ => panic!("Expected Error::Path"),
        }
        let err = get_at_path(&tree, Some("nope")).unwrap_err();
        match err {
            Error::Path(msg) => assert!(msg.contains("missing key 'nope'")),
            _ => panic!("Expected Error::Path"),
        }
    }
}
