use super::*;
use crate::markup::document::MarkupSink;

fn sample() -> Document {
    let mut doc = Document::new("westley");
    let root = doc.root();
    doc.set_attribute(root, "title", "a \"quoted\" <title>");
    let p = doc.new_element(root, "producer").unwrap();
    doc.set_attribute(p, "id", "producer0");
    let prop = doc.new_text_child(p, "property", "a & b").unwrap();
    doc.set_attribute(prop, "name", "resource");
    let b = doc.new_element(root, "blank").unwrap();
    doc.set_attribute(b, "length", "10");
    doc
}

#[test]
fn pretty_output_is_indented() {
    let xml = sample().to_xml_string(Format::Pretty);
    let expected = [
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
        "<westley title=\"a &quot;quoted&quot; &lt;title&gt;\">",
        "  <producer id=\"producer0\">",
        "    <property name=\"resource\">a &amp; b</property>",
        "  </producer>",
        "  <blank length=\"10\"/>",
        "</westley>",
        "",
    ]
    .join("\n");
    assert_eq!(xml, expected);
}

#[test]
fn compact_output_has_no_inner_whitespace() {
    let xml = sample().to_xml_string(Format::Compact);
    assert!(xml.contains("<producer id=\"producer0\"><property name=\"resource\">a &amp; b</property></producer><blank length=\"10\"/>"));
}

#[test]
fn empty_text_child_keeps_open_close_pair() {
    let mut doc = Document::new("westley");
    let root = doc.root();
    doc.new_text_child(root, "property", "").unwrap();
    let xml = doc.to_xml_string(Format::Compact);
    assert!(xml.contains("<property></property>"));
}

#[test]
fn escaping_covers_attribute_whitespace() {
    assert_eq!(escape_attr("a\nb'"), "a&#10;b&apos;");
    assert_eq!(escape_text("<'>"), "&lt;'&gt;");
}

#[test]
fn forbidden_control_characters_are_dropped() {
    assert_eq!(escape_text("a\u{1}b\u{FFFE}c\td"), "abc\td");
    assert_eq!(escape_attr("x\u{0}y\u{1F}z"), "xyz");

    let mut doc = Document::new("westley");
    let root = doc.root();
    let p = doc.new_text_child(root, "property", "bell\u{7}").unwrap();
    doc.set_attribute(p, "name", "note\u{8}");
    let xml = doc.to_xml_string(Format::Compact);
    assert!(xml.contains("<property name=\"note\">bell</property>"));
}
