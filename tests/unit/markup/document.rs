use super::*;

#[test]
fn elements_nest_in_order() {
    let mut doc = Document::new("westley");
    let root = doc.root();
    let a = doc.new_element(root, "producer").unwrap();
    let b = doc.new_element(root, "playlist").unwrap();
    doc.new_text_child(a, "property", "x").unwrap();
    assert_eq!(doc.root_element().children(), &[a, b]);
    assert_eq!(doc.element_name(b), "playlist");
    assert_eq!(doc.find_all("property")[0].text(), Some("x"));
}

#[test]
fn set_attribute_replaces_existing_value() {
    let mut doc = Document::new("westley");
    let root = doc.root();
    doc.set_attribute(root, "title", "a");
    doc.set_attribute(root, "root", "/tmp");
    doc.set_attribute(root, "title", "b");
    let attrs = doc.root_element().attrs().collect::<Vec<_>>();
    assert_eq!(attrs, vec![("title", "b"), ("root", "/tmp")]);
}

#[test]
fn limit_surfaces_sink_error() {
    let mut doc = Document::with_limit("westley", 2);
    let root = doc.root();
    doc.new_element(root, "producer").unwrap();
    let err = doc.new_element(root, "playlist").unwrap_err();
    assert!(matches!(err, WestleyError::Sink(_)));
    assert_eq!(doc.len(), 2);
}

#[test]
fn find_all_is_document_order() {
    let mut doc = Document::new("westley");
    let root = doc.root();
    let t = doc.new_element(root, "tractor").unwrap();
    let first = doc.new_element(t, "track").unwrap();
    doc.set_attribute(first, "producer", "a");
    let second = doc.new_element(t, "track").unwrap();
    doc.set_attribute(second, "producer", "b");
    let order = doc
        .find_all("track")
        .iter()
        .map(|e| e.attr("producer").unwrap())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["a", "b"]);
    assert_eq!(doc.children_named(t, "track").len(), 2);
}
