pub(crate) mod dsl;
/// Attribute names and discriminator values understood by the serializer.
pub mod keys;
pub(crate) mod model;
