use super::*;
use crate::markup::document::Document;

fn names_and_values(doc: &Document) -> Vec<(String, String)> {
    doc.find_all("property")
        .iter()
        .map(|p| {
            (
                p.attr("name").unwrap().to_string(),
                p.text().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn project_all_applies_exclusions() {
    let mut props = Properties::new();
    props.set("mlt_type", "producer");
    props.set("resource", "a.dv");
    props.set("in", "0");
    props.set("id", "x");
    props.set("title", "t");
    props.set("width", "720");
    props.set("_private", "1");
    props.set("", "empty");
    props.set_data("blob", crate::foundation::properties::DataValue::new(1u8));
    props.set("aspect_ratio", "1.0");

    let mut doc = Document::new("westley");
    let root = doc.root();
    Projector::default()
        .project_all(&mut doc, &props, root)
        .unwrap();
    assert_eq!(
        names_and_values(&doc),
        vec![
            ("mlt_type".into(), "producer".into()),
            ("resource".into(), "a.dv".into()),
            ("aspect_ratio".into(), "1.0".into()),
        ]
    );
}

#[test]
fn stored_projection_emits_store_then_meta() {
    let mut props = Properties::new();
    props.set("meta.media.width", "720");
    props.set("kdenlive.clip", "7");
    props.set("resource", "a.dv");
    props.set("_kdenlive.hidden", "1");

    let mut doc = Document::new("westley");
    let root = doc.root();
    Projector::new("", Some("kdenlive.".into()))
        .project_stored(&mut doc, &props, root)
        .unwrap();
    assert_eq!(
        names_and_values(&doc),
        vec![
            ("kdenlive.clip".into(), "7".into()),
            ("meta.media.width".into(), "720".into()),
        ]
    );
}

#[test]
fn empty_store_prefix_copies_nothing_extra() {
    let mut props = Properties::new();
    props.set("resource", "a.dv");
    let mut doc = Document::new("westley");
    let root = doc.root();
    Projector::new("", Some(String::new()))
        .project_stored(&mut doc, &props, root)
        .unwrap();
    assert!(doc.find_all("property").is_empty());
}

#[test]
fn rebase_strips_root_and_separator() {
    let p = Projector::new("/home/me/project", None);
    assert_eq!(p.rebase("/home/me/project/clips/a.dv"), "clips/a.dv");
    assert_eq!(p.rebase("/home/me/projectile/a.dv"), "/home/me/projectile/a.dv");
    assert_eq!(p.rebase("/elsewhere/a.dv"), "/elsewhere/a.dv");
    assert_eq!(p.rebase("/home/me/project"), "");

    let slash = Projector::new("/srv/", None);
    assert_eq!(slash.rebase("/srv/a.dv"), "a.dv");

    let none = Projector::new("", None);
    assert_eq!(none.rebase("/srv/a.dv"), "/srv/a.dv");
}
