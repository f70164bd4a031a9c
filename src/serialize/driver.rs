use crate::{
    foundation::error::{WestleyError, WestleyResult},
    graph::keys,
    graph::model::{Graph, NodeId},
    markup::document::{Document, ElementId, MarkupSink},
    serialize::ids::IdRegistry,
    serialize::project::Projector,
    serialize::visibility::VisibilityTable,
};

/// Name of the document's top-level element.
pub const DOCUMENT_ELEMENT: &str = "westley";

/// Settings for one serialization run.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SerializeOptions {
    /// Base directory for path rebasing; falls back to the root node's `root` attribute.
    #[serde(default)]
    pub root: Option<String>,
    /// Document title; falls back to the root node's `title` attribute.
    #[serde(default)]
    pub title: Option<String>,
    /// Key prefix copied onto reference sites alongside `meta.` keys.
    #[serde(default)]
    pub store: Option<String>,
    /// Cap on the number of elements the document may hold.
    #[serde(default)]
    pub element_limit: Option<usize>,
}

/// Traversal pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Pass 0: discover and define leaves and playlists.
    Define,
    /// Pass 1: emit composites and references.
    Reference,
}

/// State of one run. Nothing here outlives [`serialize_into`].
pub(crate) struct Serialiser<'g, 's> {
    pub(crate) graph: &'g Graph,
    pub(crate) sink: &'s mut dyn MarkupSink,
    pub(crate) ids: IdRegistry,
    pub(crate) hide: VisibilityTable,
    pub(crate) projector: Projector,
    pub(crate) pass: Pass,
    pub(crate) root: NodeId,
}

/// Serialize the graph reachable from `root` into a new [`Document`].
pub fn serialize(graph: &Graph, root: NodeId, opts: &SerializeOptions) -> WestleyResult<Document> {
    let mut doc = match opts.element_limit {
        Some(limit) => Document::with_limit(DOCUMENT_ELEMENT, limit),
        None => Document::new(DOCUMENT_ELEMENT),
    };
    serialize_into(graph, root, opts, &mut doc)?;
    Ok(doc)
}

/// Serialize into an existing sink whose root element is the document element.
///
/// Returns the identifiers claimed during the run.
#[tracing::instrument(skip(graph, root, opts, sink), fields(nodes = graph.len(), root = root.0))]
pub fn serialize_into(
    graph: &Graph,
    root: NodeId,
    opts: &SerializeOptions,
    sink: &mut dyn MarkupSink,
) -> WestleyResult<IdRegistry> {
    let Some(root_props) = graph.props(root) else {
        return Err(WestleyError::validation(format!(
            "root node {} is not in the graph",
            root.0
        )));
    };

    let doc_root = sink.root();
    let base = opts
        .root
        .as_deref()
        .or_else(|| root_props.get(keys::ROOT))
        .unwrap_or("");
    if !base.is_empty() {
        sink.set_attribute(doc_root, keys::ROOT, base);
    }
    if let Some(title) = opts.title.as_deref().or_else(|| root_props.get(keys::TITLE)) {
        sink.set_attribute(doc_root, keys::TITLE, title);
    }

    let mut run = Serialiser {
        graph,
        sink,
        ids: IdRegistry::new(),
        hide: VisibilityTable::new(),
        projector: Projector::new(base, opts.store.clone()),
        pass: Pass::Define,
        root,
    };

    run.service(Some(root), doc_root)?;
    run.pass = Pass::Reference;
    run.service(Some(root), doc_root)?;

    tracing::debug!(ids = run.ids.len(), "serialized");
    Ok(run.ids)
}

impl Serialiser<'_, '_> {
    pub(crate) fn cursor_name(&self, cursor: ElementId) -> &str {
        self.sink.element_name(cursor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/driver.rs"]
mod tests;
