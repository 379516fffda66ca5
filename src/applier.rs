//! Writes the active language into a [`Document`].
//!
//! [`apply`] is idempotent: each write is skipped when the target already
//! holds the value, so re-applying an unchanged session touches nothing.

use crate::dom::{escape_text, Document, WriteMode, KEY_ATTR, LANG_LABEL_ID, ROOT_LANG_ATTRS};
use crate::i18n::{ResolutionStep, Session};
use crate::storage::{write_preference, PreferenceStore};
use serde::Serialize;
use tracing::{debug, info};

/// What a single [`apply`] pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Language that was applied
    pub lang: String,

    /// Nodes carrying the key attribute
    pub nodes: usize,

    /// Nodes skipped because the key was empty
    pub skipped: usize,

    /// Nodes whose content or attribute actually changed
    pub written: usize,

    /// Nodes that already showed the resolved value
    pub unchanged: usize,

    /// Nodes written into an attribute
    pub attribute_writes: usize,

    /// Nodes written as markup
    pub html_writes: usize,

    /// Nodes written as plain text
    pub text_writes: usize,

    /// Keys resolved from a language other than the active one
    pub fallbacks: usize,

    /// Keys that resolved to nothing (rendered as "")
    pub missing: usize,

    /// Whether the language label element was found
    pub label_updated: bool,

    /// Whether the preference was stored
    pub persisted: bool,
}

/// Render `session` into `document` and persist the active language.
///
/// Sets `lang`/`data-lang` on the root, writes every node carrying
/// `data-i18n-key` (attribute target first, then `data-i18n-html="true"`,
/// then plain text), updates `#langLabel`, and stores the language under
/// `storage_key`. Storage failures are ignored.
///
/// Markup mode inserts bundle values as-is; bundles are trusted first-party
/// content and are not sanitized.
pub fn apply<D, S>(
    session: &Session,
    document: &mut D,
    store: &mut S,
    storage_key: &str,
) -> ApplyReport
where
    D: Document,
    S: PreferenceStore + ?Sized,
{
    let lang = session.active_language();
    let mut report = ApplyReport {
        lang: lang.to_string(),
        ..ApplyReport::default()
    };

    for attr in ROOT_LANG_ATTRS {
        document.set_root_attribute(attr, lang);
    }

    for node in document.nodes_with_attribute(KEY_ATTR) {
        report.nodes += 1;

        let key = match document.attribute(&node, KEY_ATTR) {
            Some(key) if !key.is_empty() => key,
            _ => {
                report.skipped += 1;
                continue;
            }
        };

        let resolution = session.lookup(&key);
        let value = match resolution {
            Some(resolution) => {
                if resolution.step != ResolutionStep::Active {
                    report.fallbacks += 1;
                }
                resolution.value
            }
            None => {
                debug!("No translation for '{}' in any language", key);
                report.missing += 1;
                ""
            }
        };

        let changed = match WriteMode::for_node(document, &node) {
            WriteMode::Attribute(name) => {
                report.attribute_writes += 1;
                let current = document.attribute(&node, &name);
                write_if_changed(current.as_deref() == Some(value), || {
                    document.set_attribute(&node, &name, value)
                })
            }
            WriteMode::Html => {
                report.html_writes += 1;
                let expected = document.normalize_html(value);
                let current = document.html(&node);
                write_if_changed(current == expected, || document.set_html(&node, value))
            }
            WriteMode::Text => {
                report.text_writes += 1;
                // Compared as markup so leftover child elements still get replaced
                let expected = document.normalize_html(&escape_text(value));
                let current = document.html(&node);
                write_if_changed(current == expected, || document.set_text(&node, value))
            }
        };

        if changed {
            report.written += 1;
        } else {
            report.unchanged += 1;
        }
    }

    if let Some(label) = document.element_by_id(LANG_LABEL_ID) {
        let text = session.metadata().label_for(lang);
        let expected = document.normalize_html(&escape_text(text));
        if document.html(&label) != expected {
            document.set_text(&label, text);
        }
        report.label_updated = true;
    }

    report.persisted = write_preference(store, storage_key, lang);

    info!(
        "Applied language '{}': {} nodes ({} written, {} unchanged, {} skipped), {} fallbacks, {} missing",
        report.lang,
        report.nodes,
        report.written,
        report.unchanged,
        report.skipped,
        report.fallbacks,
        report.missing
    );

    report
}

fn write_if_changed(unchanged: bool, write: impl FnOnce()) -> bool {
    if unchanged {
        return false;
    }
    write();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, MemoryElement, NodeId, HTML_ATTR, TARGET_ATTR};
    use crate::i18n::TranslationBundle;
    use crate::storage::{MemoryStore, UnavailableStore, PREFERENCE_KEY};

    fn session(active: &str) -> Session {
        let bundle = TranslationBundle::from_json(
            r#"{
                "_meta": { "defaultLang": "hy", "supported": ["hy", "en", "ru"],
                           "labels": { "hy": "Հայ", "en": "EN" } },
                "hy": { "t": "Ա", "rich": "<b>Բ</b>", "only_hy": "Հ" },
                "en": { "t": "B", "rich": "<b>B</b>", "amp": "Tom & Jerry", "br": "A<br/>B" },
                "ru": { "t": "В" }
            }"#,
        )
        .unwrap();
        Session::new(bundle, active)
    }

    fn text_node(doc: &mut MemoryDocument, key: &str) -> NodeId {
        doc.push(MemoryElement::new().with_attribute(KEY_ATTR, key).with_text("authored"))
    }

    // ==================== Root & Label Tests ====================

    #[test]
    fn test_sets_root_language_attributes() {
        let mut doc = MemoryDocument::new().with_root_attribute("lang", "hy");
        let mut store = MemoryStore::new();

        apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.root_attribute("lang"), Some("en".to_string()));
        assert_eq!(doc.root_attribute("data-lang"), Some("en".to_string()));
    }

    #[test]
    fn test_updates_label() {
        let mut doc = MemoryDocument::new();
        let label = doc.push(MemoryElement::new().with_id(LANG_LABEL_ID));
        let mut store = MemoryStore::new();

        let report = apply(&session("hy"), &mut doc, &mut store, PREFERENCE_KEY);

        assert!(report.label_updated);
        assert_eq!(doc.text(&label), "Հայ");
    }

    #[test]
    fn test_label_falls_back_to_code() {
        let mut doc = MemoryDocument::new();
        let label = doc.push(MemoryElement::new().with_id(LANG_LABEL_ID));
        let mut store = MemoryStore::new();

        apply(&session("ru"), &mut doc, &mut store, PREFERENCE_KEY);
        assert_eq!(doc.text(&label), "ru");
    }

    #[test]
    fn test_missing_label_element() {
        let mut doc = MemoryDocument::new();
        let mut store = MemoryStore::new();

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);
        assert!(!report.label_updated);
    }

    // ==================== Node Write Tests ====================

    #[test]
    fn test_text_write() {
        let mut doc = MemoryDocument::new();
        let node = text_node(&mut doc, "t");
        let mut store = MemoryStore::new();

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.text(&node), "B");
        assert_eq!(report.text_writes, 1);
        assert_eq!(report.written, 1);
    }

    #[test]
    fn test_text_write_does_not_interpret_markup() {
        let mut doc = MemoryDocument::new();
        let node = text_node(&mut doc, "rich");
        let mut store = MemoryStore::new();

        apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.text(&node), "<b>B</b>");
        assert_eq!(doc.html(&node), "&lt;b&gt;B&lt;/b&gt;");
    }

    #[test]
    fn test_html_write() {
        let mut doc = MemoryDocument::new();
        let node = doc.push(
            MemoryElement::new()
                .with_attribute(KEY_ATTR, "rich")
                .with_attribute(HTML_ATTR, "true"),
        );
        let mut store = MemoryStore::new();

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.html(&node), "<b>B</b>");
        assert_eq!(doc.text(&node), "B");
        assert_eq!(report.html_writes, 1);
    }

    #[test]
    fn test_attribute_write_leaves_text_alone() {
        let mut doc = MemoryDocument::new();
        let node = doc.push(
            MemoryElement::new()
                .with_attribute(KEY_ATTR, "t")
                .with_attribute(TARGET_ATTR, "title")
                .with_attribute(HTML_ATTR, "true")
                .with_text("authored"),
        );
        let mut store = MemoryStore::new();

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.attribute(&node, "title"), Some("B".to_string()));
        assert_eq!(doc.text(&node), "authored");
        assert_eq!(report.attribute_writes, 1);
        assert_eq!(report.html_writes, 0);
    }

    #[test]
    fn test_missing_key_everywhere_writes_empty_text() {
        let mut doc = MemoryDocument::new();
        let node = text_node(&mut doc, "missing");
        let mut store = MemoryStore::new();

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.text(&node), "");
        assert_eq!(report.missing, 1);
    }

    #[test]
    fn test_empty_key_is_skipped() {
        let mut doc = MemoryDocument::new();
        let node = doc.push(
            MemoryElement::new()
                .with_attribute(KEY_ATTR, "")
                .with_text("authored"),
        );
        let mut store = MemoryStore::new();

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.text(&node), "authored");
        assert_eq!(report.nodes, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.written, 0);
    }

    #[test]
    fn test_fallbacks_are_counted() {
        let mut doc = MemoryDocument::new();
        let node = text_node(&mut doc, "only_hy");
        text_node(&mut doc, "t");
        let mut store = MemoryStore::new();

        let report = apply(&session("ru"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.text(&node), "Հ");
        assert_eq!(report.fallbacks, 1);
        assert_eq!(report.missing, 0);
    }

    #[test]
    fn test_text_write_replaces_child_markup_with_same_text() {
        let mut doc = MemoryDocument::new();
        let node = doc.push(
            MemoryElement::new()
                .with_attribute(KEY_ATTR, "t")
                .with_html("<b>B</b>"),
        );
        let mut store = MemoryStore::new();

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.html(&node), "B");
        assert_eq!(report.written, 1);
    }

    #[test]
    fn test_label_replaces_child_markup() {
        let mut doc = MemoryDocument::new();
        let label = doc.push(MemoryElement::new().with_id(LANG_LABEL_ID).with_html("<i>EN</i>"));
        let mut store = MemoryStore::new();

        apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);
        assert_eq!(doc.html(&label), "EN");
    }

    // ==================== Persistence Tests ====================

    #[test]
    fn test_persists_language() {
        let mut doc = MemoryDocument::new();
        let mut store = MemoryStore::new();

        let report = apply(&session("ru"), &mut doc, &mut store, PREFERENCE_KEY);

        assert!(report.persisted);
        assert_eq!(store.get(PREFERENCE_KEY), Ok(Some("ru".to_string())));
    }

    #[test]
    fn test_storage_failure_is_ignored() {
        let mut doc = MemoryDocument::new();
        let node = text_node(&mut doc, "t");
        let mut store = UnavailableStore;

        let report = apply(&session("en"), &mut doc, &mut store, PREFERENCE_KEY);

        assert!(!report.persisted);
        assert_eq!(doc.text(&node), "B");
    }

    // ==================== Idempotence Tests ====================

    #[test]
    fn test_second_apply_mutates_nothing() {
        let mut doc = MemoryDocument::new();
        text_node(&mut doc, "t");
        text_node(&mut doc, "missing");
        doc.push(
            MemoryElement::new()
                .with_attribute(KEY_ATTR, "rich")
                .with_attribute(HTML_ATTR, "true"),
        );
        doc.push(
            MemoryElement::new()
                .with_attribute(KEY_ATTR, "t")
                .with_attribute(TARGET_ATTR, "aria-label"),
        );
        doc.push(MemoryElement::new().with_id(LANG_LABEL_ID));
        let mut store = MemoryStore::new();
        let session = session("en");

        apply(&session, &mut doc, &mut store, PREFERENCE_KEY);
        let after_first = doc.mutations();
        assert!(after_first > 0);

        let report = apply(&session, &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.mutations(), after_first);
        assert_eq!(report.written, 0);
        assert_eq!(report.unchanged, 4);
    }

    #[test]
    fn test_second_apply_with_escaped_text_mutates_nothing() {
        let mut doc = MemoryDocument::new();
        let node = text_node(&mut doc, "amp");
        let mut store = MemoryStore::new();
        let session = session("en");

        apply(&session, &mut doc, &mut store, PREFERENCE_KEY);
        let after_first = doc.mutations();
        let report = apply(&session, &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.text(&node), "Tom & Jerry");
        assert_eq!(doc.mutations(), after_first);
        assert_eq!(report.written, 0);
    }

    /// Re-serializes markup on read, as a browser does with `innerHTML`.
    struct SerializingDocument(MemoryDocument);

    fn serialize(html: &str) -> String {
        html.replace("<br/>", "<br>")
    }

    impl Document for SerializingDocument {
        type Node = NodeId;

        fn root_attribute(&self, name: &str) -> Option<String> {
            self.0.root_attribute(name)
        }

        fn set_root_attribute(&mut self, name: &str, value: &str) {
            self.0.set_root_attribute(name, value)
        }

        fn nodes_with_attribute(&self, attr: &str) -> Vec<NodeId> {
            self.0.nodes_with_attribute(attr)
        }

        fn element_by_id(&self, id: &str) -> Option<NodeId> {
            self.0.element_by_id(id)
        }

        fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
            self.0.attribute(node, name)
        }

        fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
            self.0.set_attribute(node, name, value)
        }

        fn text(&self, node: &NodeId) -> String {
            self.0.text(node)
        }

        fn set_text(&mut self, node: &NodeId, text: &str) {
            self.0.set_text(node, text)
        }

        fn html(&self, node: &NodeId) -> String {
            serialize(&self.0.html(node))
        }

        fn set_html(&mut self, node: &NodeId, html: &str) {
            self.0.set_html(node, html)
        }

        fn normalize_html(&self, html: &str) -> String {
            serialize(html)
        }
    }

    #[test]
    fn test_second_apply_with_reserialized_markup_writes_nothing() {
        let mut inner = MemoryDocument::new();
        let node = inner.push(
            MemoryElement::new()
                .with_attribute(KEY_ATTR, "br")
                .with_attribute(HTML_ATTR, "true"),
        );
        let mut doc = SerializingDocument(inner);
        let mut store = MemoryStore::new();
        let session = session("en");

        let first = apply(&session, &mut doc, &mut store, PREFERENCE_KEY);
        let second = apply(&session, &mut doc, &mut store, PREFERENCE_KEY);

        assert_eq!(doc.html(&node), "A<br>B");
        assert_eq!(first.written, 1);
        assert_eq!(second.written, 0);
        assert_eq!(second.unchanged, 1);
    }
}
