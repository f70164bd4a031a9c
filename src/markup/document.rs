use crate::foundation::error::{WestleyError, WestleyResult};

/// Handle of an element inside a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) u32);

/// One element: name, ordered attributes, optional text, children.
#[derive(Clone, Debug)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(name: &str, text: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            attrs: Vec::new(),
            text: text.map(str::to_owned),
            children: Vec::new(),
        }
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in the order they were first set.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Text content.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Element-tree builder driven by the serializer.
///
/// Handles are only meaningful for the sink that returned them.
pub trait MarkupSink {
    /// Top-level element.
    fn root(&self) -> ElementId;

    /// Append an empty element named `name` under `parent`.
    fn new_element(&mut self, parent: ElementId, name: &str) -> WestleyResult<ElementId>;

    /// Set (or replace) attribute `name` on `element`.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Append an element named `name` holding `text` under `parent`.
    fn new_text_child(
        &mut self,
        parent: ElementId,
        name: &str,
        text: &str,
    ) -> WestleyResult<ElementId>;

    /// Name of `element`.
    fn element_name(&self, element: ElementId) -> &str;
}

/// In-memory markup document.
#[derive(Clone, Debug)]
pub struct Document {
    elements: Vec<Element>,
    limit: Option<usize>,
}

impl Document {
    /// Document whose top-level element is `root_name`.
    pub fn new(root_name: &str) -> Self {
        Self {
            elements: vec![Element::new(root_name, None)],
            limit: None,
        }
    }

    /// Like [`Document::new`], refusing to grow past `limit` elements (root included).
    pub fn with_limit(root_name: &str, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(root_name)
        }
    }

    /// Element behind `id`.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    /// Top-level element.
    pub fn root_element(&self) -> &Element {
        &self.elements[0]
    }

    /// Number of elements, root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements named `name`, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![ElementId(0)];
        while let Some(id) = stack.pop() {
            let el = &self.elements[id.0 as usize];
            if el.name == name {
                out.push(el);
            }
            stack.extend(el.children.iter().rev().copied());
        }
        out
    }

    /// Children of `parent` named `name`.
    pub fn children_named(&self, parent: ElementId, name: &str) -> Vec<&Element> {
        self.element(parent)
            .map(|p| {
                p.children
                    .iter()
                    .map(|c| &self.elements[c.0 as usize])
                    .filter(|c| c.name == name)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn push(&mut self, parent: ElementId, el: Element) -> WestleyResult<ElementId> {
        if let Some(limit) = self.limit
            && self.elements.len() >= limit
        {
            return Err(WestleyError::sink(format!(
                "element limit {limit} reached while adding <{}>",
                el.name
            )));
        }
        let id = ElementId(u32::try_from(self.elements.len()).map_err(|_| {
            WestleyError::sink("document exceeds u32::MAX elements")
        })?);
        let Some(p) = self.elements.get_mut(parent.0 as usize) else {
            return Err(WestleyError::sink(format!(
                "unknown parent element {}",
                parent.0
            )));
        };
        p.children.push(id);
        self.elements.push(el);
        Ok(id)
    }
}

impl MarkupSink for Document {
    fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn new_element(&mut self, parent: ElementId, name: &str) -> WestleyResult<ElementId> {
        self.push(parent, Element::new(name, None))
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(el) = self.elements.get_mut(element.0 as usize) else {
            return;
        };
        if let Some(slot) = el.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_owned();
        } else {
            el.attrs.push((name.to_owned(), value.to_owned()));
        }
    }

    fn new_text_child(
        &mut self,
        parent: ElementId,
        name: &str,
        text: &str,
    ) -> WestleyResult<ElementId> {
        self.push(parent, Element::new(name, Some(text)))
    }

    fn element_name(&self, element: ElementId) -> &str {
        self.element(element).map(Element::name).unwrap_or("")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/document.rs"]
mod tests;
