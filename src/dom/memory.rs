//! In-memory [`Document`] for hosts without a browser DOM.
//!
//! Elements live in a flat list in document order; there is no tree. That is
//! enough for the translator, which only ever queries by attribute or id.
//! Every effective write bumps a mutation counter.

use crate::dom::{escape_text, Document};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Markup(String),
}

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryElement {
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    content: Content,
}

impl Default for MemoryElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryElement {
    pub fn new() -> Self {
        Self {
            id: None,
            attributes: BTreeMap::new(),
            content: Content::Text(String::new()),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.content = Content::Markup(html.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Text content; markup is reduced to its text by dropping tags.
    pub fn text(&self) -> String {
        match &self.content {
            Content::Text(text) => text.clone(),
            Content::Markup(html) => strip_tags(html),
        }
    }

    /// Inner markup; plain text is escaped.
    pub fn html(&self) -> String {
        match &self.content {
            Content::Text(text) => escape_text(text),
            Content::Markup(html) => html.clone(),
        }
    }
}

/// A flat, in-memory document.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    root_attributes: BTreeMap<String, String>,
    elements: Vec<MemoryElement>,
    mutations: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a root attribute without counting it as a mutation (page authoring).
    pub fn with_root_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.root_attributes.insert(name.into(), value.into());
        self
    }

    /// Append an element and return its handle.
    pub fn push(&mut self, element: MemoryElement) -> NodeId {
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    pub fn element(&self, node: NodeId) -> Option<&MemoryElement> {
        self.elements.get(node.0)
    }

    /// Number of writes that changed the document since creation.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    fn element_mut(&mut self, node: &NodeId) -> Option<&mut MemoryElement> {
        self.elements.get_mut(node.0)
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.get(name).cloned()
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        let previous = self.root_attributes.insert(name.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.mutations += 1;
        }
    }

    fn nodes_with_attribute(&self, attr: &str) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.attributes.contains_key(attr))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.attribute(name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let previous = element.attributes.insert(name.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.mutations += 1;
        }
    }

    fn text(&self, node: &NodeId) -> String {
        self.element(*node).map(MemoryElement::text).unwrap_or_default()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let content = Content::Text(text.to_string());
        if element.content != content {
            element.content = content;
            self.mutations += 1;
        }
    }

    fn html(&self, node: &NodeId) -> String {
        self.element(*node).map(MemoryElement::html).unwrap_or_default()
    }

    fn set_html(&mut self, node: &NodeId, html: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let content = Content::Markup(html.to_string());
        if element.content != content {
            element.content = content;
            self.mutations += 1;
        }
    }
}

fn strip_tags(html: &str) -> String {
    let regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    regex.replace_all(html, "").into_owned()
}
