use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use serde::de::Error as _;

/// Opaque owned payload stored in a property slot.
///
/// Blobs carry no text form: the serializer never emits them and JSON output skips them.
#[derive(Clone)]
pub struct DataValue(Arc<dyn Any + Send + Sync>);

impl DataValue {
    /// Wrap an owned value. It is dropped with the last clone of the slot.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the payload if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataValue")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// Property value: scalar text or an opaque blob.
#[derive(Clone, Debug)]
pub enum Value {
    /// Scalar text value.
    Text(String),
    /// Opaque owned payload.
    Data(DataValue),
}

impl Value {
    /// Text form of the value, `None` for blobs.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Data(_) => None,
        }
    }
}

/// Ordered, string-keyed property bag.
///
/// Iteration follows insertion order; replacing a key keeps its position.
#[derive(Clone, Debug, Default)]
pub struct Properties {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Properties {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, blobs included.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// True when the bag holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `key` is present, whatever its value type.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Text value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let &i = self.index.get(key)?;
        self.entries[i].1.as_text()
    }

    /// Integer value of `key`; 0 when missing or not numeric.
    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).map(parse_int_prefix).unwrap_or(0)
    }

    /// Blob stored under `key`.
    pub fn get_data(&self, key: &str) -> Option<&DataValue> {
        let &i = self.index.get(key)?;
        match &self.entries[i].1 {
            Value::Data(d) => Some(d),
            Value::Text(_) => None,
        }
    }

    /// Set a text value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key.into(), Value::Text(value.into()));
    }

    /// Set an integer value, stored as decimal text.
    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key.into(), Value::Text(value.to_string()));
    }

    /// Store an opaque blob.
    pub fn set_data(&mut self, key: impl Into<String>, value: DataValue) {
        self.insert(key.into(), Value::Data(value));
    }

    /// Name of the entry at position `i`.
    pub fn name_at(&self, i: usize) -> Option<&str> {
        self.entries.get(i).map(|(k, _)| k.as_str())
    }

    /// Text value of the entry at position `i`; `None` for blobs or out of range.
    pub fn value_at(&self, i: usize) -> Option<&str> {
        self.entries.get(i).and_then(|(_, v)| v.as_text())
    }

    /// Iterate `(name, text value)` pairs in order. Blobs yield `None`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_text()))
    }

    fn insert(&mut self, key: String, value: Value) {
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1 = value;
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }
}

// Leading optional sign plus digits; trailing text is ignored and no digits read as 0.
fn parse_int_prefix(s: &str) -> i64 {
    let t = s.trim_start();
    if let Ok(v) = t.parse::<i64>() {
        return v;
    }
    let (neg, digits) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let v = digits[..end].parse::<i64>().unwrap_or(0);
    if neg { -v } else { v }
}

impl serde::Serialize for Properties {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.entries
                .iter()
                .filter_map(|(k, v)| v.as_text().map(|t| (k, t))),
        )
    }
}

impl<'de> serde::Deserialize<'de> for Properties {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> serde::de::Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property names to scalar values")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Properties, A::Error> {
                let mut props = Properties::new();
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    let text = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Number(n) => n.to_string(),
                        serde_json::Value::Bool(b) => u8::from(b).to_string(),
                        serde_json::Value::Null => continue,
                        other => {
                            return Err(A::Error::custom(format!(
                                "property '{key}' must be a scalar, got {other}"
                            )));
                        }
                    };
                    props.set(key, text);
                }
                Ok(props)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/properties.rs"]
mod tests;
