use indoc::indoc;

use yamlite::yaml::{self, Node};

fn app_config() -> Node {
    yaml::parse_str(indoc! {r#"
        app:
          name: "MyApp"
          version: 1.0
          enabled: true
          ports:
            - 8080
            - 9090
    "#})
    .unwrap()
}

// =============================================================================
// get / at
// =============================================================================

#[test]
fn test_get_walks_mapping_children() {
    let root = app_config();
    let app = root.get("app").unwrap();
    assert!(app.get("name").is_some());
    assert!(app.get("nope").is_none());
    // get on a non-mapping is absence, not an error
    assert!(app.get("name").unwrap().get("x").is_none());
}

#[test]
fn test_at_indexes_sequence_children() {
    let root = app_config();
    let ports = root.get("app").unwrap().get("ports").unwrap();
    assert_eq!(ports.at(0), Some(&Node::Scalar("8080".to_string())));
    assert_eq!(ports.at(1), Some(&Node::Scalar("9090".to_string())));
    assert_eq!(ports.at(2), None);
    assert_eq!(ports.at(-1), None);
}

#[test]
fn test_duplicate_key_first_wins() {
    let root = yaml::parse_str("k: first\nk: second\n").unwrap();
    assert_eq!(root.get("k").unwrap().as_str(), Some("first"));
}

// =============================================================================
// Typed accessors
// =============================================================================

#[test]
fn test_typed_accessors_on_app_config() {
    let root = app_config();
    let app = root.get("app").unwrap();

    assert_eq!(app.get_str(Some("name"), "Unknown"), "MyApp");
    assert_eq!(app.get_double(Some("version"), 0.0), 1.0);
    assert!(app.get_bool(Some("enabled"), false));
    assert_eq!(app.get_int(Some("missing"), 42), 42);

    let ports = app.get("ports").unwrap();
    assert_eq!(ports.at(0).unwrap().get_int(None, 0), 8080);
}

#[test]
fn test_accessors_fall_back_to_defaults() {
    let root = yaml::parse_str(indoc! {"
        word: hello
        empty:
        list:
          - 1
    "})
    .unwrap();

    // non-numeric text yields the default, not zero
    assert_eq!(root.get_int(Some("word"), -1), -1);
    assert_eq!(root.get_double(Some("word"), 2.5), 2.5);
    // null and containers are not scalars
    assert_eq!(root.get_str(Some("empty"), "dflt"), "dflt");
    assert_eq!(root.get_str(Some("list"), "dflt"), "dflt");
    assert!(root.get_bool(Some("word"), true));
}

#[test]
fn test_bool_spellings() {
    let root = yaml::parse_str(indoc! {"
        a: Yes
        b: off
        c: TRUE
        d: 0
    "})
    .unwrap();
    assert!(root.get_bool(Some("a"), false));
    assert!(!root.get_bool(Some("b"), true));
    assert!(root.get_bool(Some("c"), false));
    assert!(!root.get_bool(Some("d"), true));
}

#[test]
fn test_numeric_prefix_parsing() {
    let root = yaml::parse_str(indoc! {"
        port: 8080/tcp
        ratio: 1.5x faster
    "})
    .unwrap();
    assert_eq!(root.get_int(Some("port"), 0), 8080);
    assert_eq!(root.get_double(Some("ratio"), 0.0), 1.5);
}

#[test]
fn test_accessor_without_key_operates_on_node() {
    let root = yaml::parse_str("8080\n").unwrap();
    assert_eq!(root.get_int(None, 0), 8080);
    assert_eq!(root.get_str(None, "x"), "8080");
}

// =============================================================================
// Concurrent read-only queries
// =============================================================================

#[test]
fn test_finished_tree_is_safe_to_share_across_threads() {
    let root = std::sync::Arc::new(app_config());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let root = std::sync::Arc::clone(&root);
            std::thread::spawn(move || {
                let app = root.get("app").unwrap();
                assert_eq!(app.get_double(Some("version"), 0.0), 1.0);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
