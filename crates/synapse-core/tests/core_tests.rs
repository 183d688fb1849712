use std::fs;

use synapse_core::config::{Config, ExplorerSettings};
use synapse_core::types::{Document, GraphData, GraphLink, GraphNode};

#[test]
fn settings_default_when_no_config_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(tmp.path(), "dev").expect("load");
    let settings = config.settings().expect("settings");

    assert_eq!(settings, ExplorerSettings::default());
    assert_eq!(settings.k, 40);
    assert_eq!(settings.items_per_page, 20);
    assert_eq!(settings.graph_stagger().as_millis(), 600);
    assert_eq!(settings.spelling_debounce().as_millis(), 500);
}

#[test]
fn env_file_overrides_base_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[explorer]\nbase_url = \"http://search.internal:5000\"\nk = 25\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.prod.toml"), "[explorer]\nk = 60\n").unwrap();

    let settings = Config::load_from(tmp.path(), "prod").unwrap().settings().unwrap();
    assert_eq!(settings.base_url, "http://search.internal:5000");
    assert_eq!(settings.k, 60, "prod overlay wins over the base file");
    assert_eq!(settings.items_per_page, 20, "untouched keys keep their defaults");
}

#[test]
fn invalid_settings_are_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[explorer]\nitems_per_page = 0\n").unwrap();
    assert!(Config::load_from(tmp.path(), "dev").is_err());

    let settings = ExplorerSettings { base_url: "  ".to_string(), ..ExplorerSettings::default() };
    assert!(settings.validate().is_err());
}

#[test]
fn document_tolerates_missing_fields_and_reads_extra_tags() {
    let doc: Document = serde_json::from_str(
        r#"{"title": "Attention", "tags": ["transformer", "nlp"], "extra-tags": ["nlp", "google"]}"#,
    )
    .unwrap();

    assert_eq!(doc.title, "Attention");
    assert!(doc.url.is_empty());
    assert_eq!(doc.all_tags(), vec!["transformer", "nlp", "google"]);
    assert!(doc.has_tag("google"));
    assert!(!doc.has_tag("vision"));
}

#[test]
fn links_touching_matches_either_end() {
    let node = |id: &str| GraphNode { id: id.to_string(), color: String::new(), group: "0".to_string(), size: 0 };
    let link = |s: &str, t: &str| GraphLink { source: s.to_string(), target: t.to_string(), relation: "r".to_string() };
    let graph = GraphData { nodes: vec![node("a"), node("b"), node("c")], links: vec![link("a", "b"), link("b", "c"), link("c", "a")] };

    assert_eq!(graph.links_touching("b").count(), 2);
    assert!(graph.node("c").is_some());
    assert!(graph.node("z").is_none());
}
