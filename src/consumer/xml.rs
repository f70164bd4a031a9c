use std::{
    fs::File,
    io::{BufWriter, Write},
};

use anyhow::Context as _;

use crate::{
    consumer::config::{ConsumerConfig, Delivery},
    foundation::error::{WestleyError, WestleyResult},
    foundation::properties::Properties,
    graph::model::{Graph, NodeId},
    markup::document::Document,
    markup::writer::Format,
    serialize::driver::{SerializeOptions, serialize},
};

/// Serializes a graph and delivers the document to stdout, a file or a property.
#[derive(Debug)]
pub struct Consumer {
    config: ConsumerConfig,
    properties: Properties,
}

impl Consumer {
    /// Consumer with `config`; the settings are also readable from [`Consumer::properties`].
    pub fn new(config: ConsumerConfig) -> Self {
        let mut properties = Properties::new();
        for (key, value) in [
            ("resource", &config.resource),
            ("title", &config.title),
            ("root", &config.root),
            ("store", &config.store),
        ] {
            if let Some(v) = value {
                properties.set(key, v.as_str());
            }
        }
        Self { config, properties }
    }

    /// Active configuration.
    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    /// The consumer's own bag; property deliveries land here.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Options for one run. A file or property resource without a configured root rebases
    /// against the current directory.
    pub fn options(&self) -> WestleyResult<SerializeOptions> {
        let has_resource = self.config.resource.as_deref().is_some_and(|r| !r.is_empty());
        let root = match &self.config.root {
            Some(root) => Some(root.clone()),
            None if has_resource => {
                let cwd = std::env::current_dir()?;
                Some(cwd.to_string_lossy().into_owned())
            }
            None => None,
        };
        Ok(SerializeOptions {
            root,
            title: self.config.title.clone(),
            store: self.config.store.clone(),
            element_limit: None,
        })
    }

    /// Build the document for `root` without delivering it.
    pub fn document(&self, graph: &Graph, root: NodeId) -> WestleyResult<Document> {
        serialize(graph, root, &self.options()?)
    }

    /// Serialize the graph's root and deliver it.
    pub fn start(&mut self, graph: &Graph) -> WestleyResult<()> {
        let root = graph
            .root()
            .ok_or_else(|| WestleyError::validation("graph has no nodes to serialize"))?;
        self.start_at(graph, root)
    }

    /// Serialize from `root` and deliver it.
    #[tracing::instrument(skip(self, graph), fields(delivery = ?self.config.delivery()))]
    pub fn start_at(&mut self, graph: &Graph, root: NodeId) -> WestleyResult<()> {
        let doc = self.document(graph, root)?;

        match self.config.delivery() {
            Delivery::Stdout => {
                let stdout = std::io::stdout();
                doc.write_xml(stdout.lock(), self.config.format)?;
            }
            Delivery::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create output dir '{}'", parent.display()))?;
                }
                let f = File::create(&path)
                    .with_context(|| format!("create '{}'", path.display()))?;
                let mut w = BufWriter::new(f);
                doc.write_xml(&mut w, self.config.format)?;
                w.flush()?;
                tracing::info!(path = %path.display(), "wrote document");
            }
            Delivery::Property(name) => {
                let xml = doc.to_xml_string(Format::Compact);
                self.properties.set(name, xml);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/consumer/xml.rs"]
mod tests;
