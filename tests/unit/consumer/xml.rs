use super::*;
use crate::graph::dsl::GraphBuilder;

fn tiny_graph() -> Graph {
    let mut b = GraphBuilder::new();
    let p = b.producer("colour", "black");
    b.set_int(p, "in", 0).unwrap();
    b.set_int(p, "out", 49).unwrap();
    let pl = b.playlist();
    b.append(pl, p, 0, 24).unwrap();
    b.root(pl).build().unwrap()
}

#[test]
fn property_delivery_stores_compact_xml() {
    let mut consumer = Consumer::new(ConsumerConfig::new().resource("buffer").root("/"));
    consumer.start(&tiny_graph()).unwrap();
    let xml = consumer.properties().get("buffer").unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<westley"));
    assert!(xml.contains("<entry producer=\"producer0\" in=\"0\" out=\"24\"/>"));
    assert!(!xml.contains("\n  "));
}

#[test]
fn config_is_mirrored_into_properties() {
    let consumer = Consumer::new(ConsumerConfig::new().title("Edit").store("app."));
    assert_eq!(consumer.properties().get("title"), Some("Edit"));
    assert_eq!(consumer.properties().get("store"), Some("app."));
    assert_eq!(consumer.properties().get("resource"), None);
}

#[test]
fn resource_without_root_rebases_on_cwd() {
    let consumer = Consumer::new(ConsumerConfig::new().resource("buffer"));
    let opts = consumer.options().unwrap();
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(opts.root, Some(cwd.to_string_lossy().into_owned()));

    let stdout = Consumer::new(ConsumerConfig::new());
    assert_eq!(stdout.options().unwrap().root, None);
}

#[test]
fn file_delivery_writes_pretty_xml() {
    let dir = std::path::PathBuf::from("target").join("consumer_unit");
    let path = dir.join("tiny.westley");
    let _ = std::fs::remove_file(&path);

    let mut consumer = Consumer::new(
        ConsumerConfig::new()
            .resource(path.to_string_lossy().to_string())
            .root("/"),
    );
    consumer.start(&tiny_graph()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  <playlist id=\"playlist0\">"));
}

#[test]
fn empty_graph_is_rejected() {
    let mut consumer = Consumer::new(ConsumerConfig::new().resource("buffer"));
    assert!(consumer.start(&Graph::new()).is_err());
}

#[test]
fn output_override_writes_extensionless_file() {
    let path = std::path::PathBuf::from("target")
        .join("consumer_unit")
        .join("nested")
        .join("edit");
    let _ = std::fs::remove_file(&path);

    let mut consumer = Consumer::new(
        ConsumerConfig::new()
            .output(&path)
            .format(Format::Compact)
            .root("/"),
    );
    consumer.start(&tiny_graph()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("<playlist id=\"playlist0\"><entry"));
    assert_eq!(consumer.properties().get("edit"), None);
}
