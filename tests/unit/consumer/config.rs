use super::*;

#[test]
fn delivery_follows_resource_shape() {
    assert_eq!(ConsumerConfig::new().delivery(), Delivery::Stdout);
    assert_eq!(ConsumerConfig::new().resource("").delivery(), Delivery::Stdout);
    assert_eq!(
        ConsumerConfig::new().resource("out/edit.westley").delivery(),
        Delivery::File(PathBuf::from("out/edit.westley"))
    );
    assert_eq!(
        ConsumerConfig::new().resource("string").delivery(),
        Delivery::Property("string".to_string())
    );
}

#[test]
fn config_deserializes_with_defaults() {
    let c: ConsumerConfig = serde_json::from_str(r#"{"store":"app."}"#).unwrap();
    assert_eq!(c.store.as_deref(), Some("app."));
    assert_eq!(c.format, Format::Pretty);
    assert!(c.resource.is_none());
}

#[test]
fn output_override_wins_over_resource() {
    let c = ConsumerConfig::new().resource("buffer").output("out/edit");
    assert_eq!(c.delivery(), Delivery::File(PathBuf::from("out/edit")));
}
