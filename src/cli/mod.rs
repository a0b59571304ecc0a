mod def;
include!(concat!(env!("OUT_DIR"), "/rustc_version.rs"));
use clap::Parser;

pub mod log;

use crate::yaml::{self, Error, Node};

impl From<Error> for String {
    fn from(e: Error) -> Self {
        e.to_string()
    }
}

/// Format a node under the current output policy.
fn format_node(node: &Node, yaml_mode: bool) -> String {
    if yaml_mode {
        yaml::serialize(node)
    } else {
        let raw = yaml::serialize_raw(node);
        if raw.ends_with('\n') {
            raw
        } else {
            format!("{}\n", raw)
        }
    }
}

pub fn run() -> Result<bool, String> {
    let cli = def::Args::parse();

    log::setup(cli.verbose, cli.log_time)?;

    if cli.color && cli.no_color {
        return Err("Cannot use both --color and --no-color".to_string());
    }
    if cli.color {
        colored::control::set_override(true);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.version {
        println!("version: {}", env!("CARGO_PKG_VERSION"));
        println!("Rust: {}", RUSTC_VERSION);
        return Ok(true);
    }

    let Some(file) = &cli.file else {
        return Err("Missing FILE argument".to_string());
    };

    ::log::debug!("parsing '{}'", file);
    let root = yaml::parse_file(file)?;
    ::log::trace!("parsed root of type '{}'", root.type_name());

    match &cli.action {
        None => {
            // no command: pretty-print the whole document
            print!("{}", yaml::serialize(&root));
        }
        Some(def::Actions::GetValue {
            path,
            default,
            yaml,
        }) => {
            let yaml_mode = cli.yaml || *yaml;
            let path = path.as_ref().map(|s| s.as_str());
            match yaml::get_at_path(&root, path) {
                Ok(node) => print!("{}", format_node(node, yaml_mode)),
                Err(Error::Path(e)) => {
                    if let Some(default) = default {
                        println!("{}", default);
                        return Ok(true);
                    }
                    if cli.quiet {
                        return Ok(false);
                    }
                    return Err(e);
                }
                Err(e) => return Err(e.to_string()),
            }
        }
        Some(def::Actions::GetType { path }) => {
            let path = path.as_ref().map(|s| s.as_str());
            match yaml::get_at_path(&root, path) {
                Ok(node) => println!("{}", node.type_name()),
                Err(e) => {
                    if cli.quiet {
                        return Ok(false);
                    }
                    return Err(e.to_string());
                }
            }
        }
        Some(def::Actions::GetLength { path }) => {
            let path = path.as_ref().map(|s| s.as_str());
            let node = yaml::get_at_path(&root, path)?;
            match node.len() {
                Some(len) => println!("{}", len),
                None => {
                    return Err(format!(
                        "get-length does not support '{}' type. Please provide or select a sequence or struct.",
                        node.type_name()
                    ));
                }
            }
        }
        Some(def::Actions::Keys { path }) => {
            let path = path.as_ref().map(|s| s.as_str());
            let node = yaml::get_at_path(&root, path)?;
            match node {
                Node::Mapping(entries) => {
                    for (key, _) in entries {
                        println!("{}", key);
                    }
                }
                _ => {
                    return Err(format!(
                        "keys does not support '{}' type. Please provide or select a struct.",
                        node.type_name()
                    ));
                }
            }
        }
        Some(def::Actions::Values { path }) => {
            let path = path.as_ref().map(|s| s.as_str());
            let node = yaml::get_at_path(&root, path)?;
            match node {
                Node::Mapping(entries) => {
                    for (_, value) in entries {
                        print!("{}", format_node(value, cli.yaml));
                    }
                }
                _ => {
                    return Err(format!(
                        "values does not support '{}' type. Please provide or select a struct.",
                        node.type_name()
                    ));
                }
            }
        }
    }
    Ok(true)
}
