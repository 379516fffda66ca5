//! Document abstraction used by the applier.
//!
//! The browser DOM (see `web`) and [`MemoryDocument`] both implement
//! [`Document`]. Node handles are cheap, independent values: querying hands
//! back a snapshot, and each handle can be read or written on its own.

mod memory;

pub use memory::{MemoryDocument, MemoryElement, NodeId};

/// Attribute holding the translation key.
pub const KEY_ATTR: &str = "data-i18n-key";

/// Attribute naming another attribute to receive the value.
pub const TARGET_ATTR: &str = "data-i18n-attr";

/// Attribute that, when exactly `"true"`, renders the value as markup.
pub const HTML_ATTR: &str = "data-i18n-html";

/// Root attributes that mirror the active language.
pub const ROOT_LANG_ATTRS: [&str; 2] = ["lang", "data-lang"];

/// Id of the element that cycles the language when clicked.
pub const LANG_BUTTON_ID: &str = "langBtn";

/// Id of the element showing the active language label.
pub const LANG_LABEL_ID: &str = "langLabel";

/// A page the translator can read and write.
pub trait Document {
    /// Handle to one element.
    type Node: Clone;

    /// Attribute on the root (`<html>`) element.
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute on the root element.
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Every element that currently carries `attr`, in document order.
    fn nodes_with_attribute(&self, attr: &str) -> Vec<Self::Node>;

    /// Element with the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Plain text content of an element.
    fn text(&self, node: &Self::Node) -> String;

    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Inner markup of an element.
    fn html(&self, node: &Self::Node) -> String;

    /// Replace the inner markup of an element. The markup is not sanitized.
    fn set_html(&mut self, node: &Self::Node, html: &str);

    /// Markup as [`html`](Document::html) would report it after
    /// [`set_html`](Document::set_html). Backends that re-serialize markup
    /// override this; the default returns it unchanged.
    fn normalize_html(&self, html: &str) -> String {
        html.to_string()
    }
}

/// Escape text the way it serializes as inner markup of an element.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

/// How a node wants its value written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Into the named attribute
    Attribute(String),
    /// As inner markup
    Html,
    /// As plain text
    Text,
}

impl WriteMode {
    /// Decide the write mode from a node's modifier attributes.
    ///
    /// An attribute target wins over the HTML flag. Anything unrecognized
    /// (empty target, HTML flag other than `"true"`) means plain text.
    pub fn from_modifiers(target_attr: Option<String>, html_flag: Option<&str>) -> Self {
        match target_attr {
            Some(attr) if !attr.is_empty() => Self::Attribute(attr),
            _ if html_flag == Some("true") => Self::Html,
            _ => Self::Text,
        }
    }

    /// Read a node's modifiers and decide its write mode.
    pub fn for_node<D: Document>(document: &D, node: &D::Node) -> Self {
        let html_flag = document.attribute(node, HTML_ATTR);
        Self::from_modifiers(document.attribute(node, TARGET_ATTR), html_flag.as_deref())
    }
}
