use std::path::PathBuf;

use crate::markup::writer::Format;

/// Consumer settings, mirrored into the consumer's property bag.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ConsumerConfig {
    /// Output target: empty for stdout, a file name (contains `.`), or a property name.
    #[serde(default)]
    pub resource: Option<String>,
    /// Document title overriding the graph root's title.
    #[serde(default)]
    pub title: Option<String>,
    /// Base directory for path rebasing.
    #[serde(default)]
    pub root: Option<String>,
    /// Key prefix copied onto reference sites alongside `meta.` keys.
    #[serde(default)]
    pub store: Option<String>,
    /// Layout of stdout and file output. Property buffers are always compact.
    #[serde(default)]
    pub format: Format,
    /// File to write whatever the resource says, including paths without an extension.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Where a finished document goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Standard output.
    Stdout,
    /// A file on disk.
    File(PathBuf),
    /// A text property of the consumer, named by the resource.
    Property(String),
}

impl ConsumerConfig {
    /// Empty configuration: stdout, no title, no root, no store prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output resource.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the rebasing root.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Set the store prefix.
    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Set the output layout.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Write to `path` regardless of the resource.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Delivery implied by the output override, else by the resource.
    pub fn delivery(&self) -> Delivery {
        if let Some(path) = &self.output {
            return Delivery::File(path.clone());
        }
        match self.resource.as_deref() {
            None | Some("") => Delivery::Stdout,
            Some(r) if r.contains('.') => Delivery::File(PathBuf::from(r)),
            Some(r) => Delivery::Property(r.to_owned()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/consumer/config.rs"]
mod tests;
