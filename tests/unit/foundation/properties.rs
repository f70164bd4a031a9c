use super::*;

#[test]
fn set_replaces_in_place_and_keeps_order() {
    let mut p = Properties::new();
    p.set("a", "1");
    p.set("b", "2");
    p.set("a", "3");
    assert_eq!(p.count(), 2);
    assert_eq!(p.name_at(0), Some("a"));
    assert_eq!(p.value_at(0), Some("3"));
    assert_eq!(p.name_at(1), Some("b"));
}

#[test]
fn get_int_parses_leading_digits() {
    let mut p = Properties::new();
    p.set("plain", "42");
    p.set("neg", "-7");
    p.set("suffix", "12frames");
    p.set("junk", "abc");
    assert_eq!(p.get_int("plain"), 42);
    assert_eq!(p.get_int("neg"), -7);
    assert_eq!(p.get_int("suffix"), 12);
    assert_eq!(p.get_int("junk"), 0);
    assert_eq!(p.get_int("missing"), 0);
}

#[test]
fn blobs_have_no_text_form() {
    let mut p = Properties::new();
    p.set_data("_blob", DataValue::new(vec![1u8, 2, 3]));
    assert!(p.contains("_blob"));
    assert_eq!(p.get("_blob"), None);
    assert_eq!(p.value_at(0), None);
    let data = p.get_data("_blob").unwrap();
    assert_eq!(data.downcast_ref::<Vec<u8>>(), Some(&vec![1u8, 2, 3]));
}

#[test]
fn json_preserves_insertion_order_and_skips_blobs() {
    let p: Properties =
        serde_json::from_str(r#"{"zeta":"z","alpha":1,"flag":true,"gone":null}"#).unwrap();
    let names = p.iter().map(|(k, _)| k).collect::<Vec<_>>();
    assert_eq!(names, vec!["zeta", "alpha", "flag"]);
    assert_eq!(p.get("alpha"), Some("1"));
    assert_eq!(p.get("flag"), Some("1"));

    let mut q = p.clone();
    q.set_data("_cache", DataValue::new(5u32));
    let s = serde_json::to_string(&q).unwrap();
    assert_eq!(s, r#"{"zeta":"z","alpha":"1","flag":"1"}"#);
}

#[test]
fn json_rejects_nested_values() {
    let err = serde_json::from_str::<Properties>(r#"{"a":[1,2]}"#).unwrap_err();
    assert!(err.to_string().contains("must be a scalar"));
}
