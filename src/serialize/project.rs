use crate::{
    foundation::error::WestleyResult,
    foundation::properties::Properties,
    graph::keys,
    markup::document::{ElementId, MarkupSink},
};

/// Keys already written as element attributes, or meaningless in a document.
pub const EXCLUDED_KEYS: &[&str] = &[
    keys::WESTLEY,
    keys::IN,
    keys::OUT,
    keys::ID,
    keys::TITLE,
    keys::ROOT,
    "width",
    "height",
];

/// Copies attribute bags into `<property name="..">value</property>` children.
#[derive(Clone, Debug, Default)]
pub struct Projector {
    root: String,
    store: Option<String>,
}

impl Projector {
    /// Projector rebasing against `root` (empty disables) and copying `store`-prefixed keys
    /// at reference sites.
    pub fn new(root: impl Into<String>, store: Option<String>) -> Self {
        Self {
            root: root.into(),
            store: store.filter(|s| !s.is_empty()),
        }
    }

    /// Every qualifying key: non-empty, not `_`-prefixed, text-valued, not excluded.
    pub fn project_all(
        &self,
        sink: &mut dyn MarkupSink,
        props: &Properties,
        element: ElementId,
    ) -> WestleyResult<()> {
        for (name, value) in props.iter() {
            let Some(value) = value else {
                continue;
            };
            if name.is_empty() || name.starts_with('_') || EXCLUDED_KEYS.contains(&name) {
                continue;
            }
            self.emit(sink, element, name, value)?;
        }
        Ok(())
    }

    /// Keys starting with `prefix`, without the exclusion list.
    pub fn project_prefixed(
        &self,
        sink: &mut dyn MarkupSink,
        props: &Properties,
        element: ElementId,
        prefix: &str,
    ) -> WestleyResult<()> {
        for (name, value) in props.iter() {
            if !name.starts_with(prefix) {
                continue;
            }
            if let Some(value) = value {
                self.emit(sink, element, name, value)?;
            }
        }
        Ok(())
    }

    /// Store-prefixed keys, then `meta.` keys.
    pub fn project_stored(
        &self,
        sink: &mut dyn MarkupSink,
        props: &Properties,
        element: ElementId,
    ) -> WestleyResult<()> {
        if let Some(store) = &self.store {
            self.project_prefixed(sink, props, element, store)?;
        }
        self.project_prefixed(sink, props, element, keys::META_PREFIX)
    }

    /// Strip the root directory and its separator from `value`.
    pub fn rebase<'v>(&self, value: &'v str) -> &'v str {
        if self.root.is_empty() {
            return value;
        }
        let Some(rest) = value.strip_prefix(self.root.as_str()) else {
            return value;
        };
        if rest.is_empty() {
            return rest;
        }
        if self.root.ends_with(['/', '\\']) {
            return rest;
        }
        rest.strip_prefix(['/', '\\']).unwrap_or(value)
    }

    fn emit(
        &self,
        sink: &mut dyn MarkupSink,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> WestleyResult<()> {
        let p = sink.new_text_child(element, "property", self.rebase(value))?;
        sink.set_attribute(p, "name", name);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/project.rs"]
mod tests;
