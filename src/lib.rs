//! yamlite: a self-contained YAML subset parser with typed accessors.
//!
//! Covers the block-YAML subset most configuration files use: block
//! mappings, block sequences, plain and quoted scalars, comments, nested
//! structures, one document per stream. Anchors, aliases, tags, flow styles
//! and multi-document streams are out of scope.
//!
//! ```
//! use yamlite::yaml;
//!
//! let root = yaml::parse_str("app:\n  name: \"MyApp\"\n  enabled: true\n").unwrap();
//! let app = root.get("app").unwrap();
//! assert_eq!(app.get_str(Some("name"), "Unknown"), "MyApp");
//! assert!(app.get_bool(Some("enabled"), false));
//! ```

pub mod cli;
pub mod yaml;
