//! Browser entry point (wasm32 only).
//!
//! Binds [`Document`] to the live DOM and [`PreferenceStore`] to
//! `localStorage`, then runs the translator once the document is ready and
//! wires `#langBtn` to cycle the language.

use crate::config::Config;
use crate::dom::{Document, LANG_BUTTON_ID};
use crate::error::StorageError;
use crate::storage::PreferenceStore;
use crate::translator::Translator;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

/// The live page.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if any.
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root()?.get_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        let Some(root) = self.root() else {
            return;
        };
        if let Err(e) = root.set_attribute(name, value) {
            warn!("Failed to set root attribute '{}': {:?}", name, e);
        }
    }

    fn nodes_with_attribute(&self, attr: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(&format!("[{}]", attr)) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        // Invalid attribute names throw; the node is left as authored.
        if let Err(e) = node.set_attribute(name, value) {
            warn!("Failed to set attribute '{}': {:?}", name, e);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_html(&mut self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    /// Round-trips the markup through a detached `<template>`, so it comes
    /// back serialized exactly as `innerHTML` reports it.
    fn normalize_html(&self, html: &str) -> String {
        match self.document.create_element("template") {
            Ok(template) => {
                template.set_inner_html(html);
                template.inner_html()
            }
            Err(e) => {
                warn!("Failed to create template element: {:?}", e);
                html.to_string()
            }
        }
    }
}

/// `window.localStorage`, or nothing when the browser refuses access.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn current() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

/// Module start: translate once the DOM is ready.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::new(|| spawn_local(run()));
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        spawn_local(run());
    }

    Ok(())
}

async fn run() {
    let Some(page) = WebDocument::current() else {
        warn!("No document available, skipping translation");
        return;
    };
    let Some(site_url) = web_sys::window().and_then(|w| w.location().href().ok()) else {
        warn!("Page URL unavailable, skipping translation");
        return;
    };

    let config = Config::for_site(site_url);
    match Translator::init(&config, page, LocalStorage::current()).await {
        Ok(translator) => attach_language_button(translator),
        Err(e) => warn!("Translation disabled: {}", e),
    }
}

fn attach_language_button(translator: Translator<WebDocument, LocalStorage>) {
    let Some(button) = translator.document().element_by_id(LANG_BUTTON_ID) else {
        return;
    };

    let translator = Rc::new(RefCell::new(translator));
    let on_click = Closure::<dyn FnMut()>::new(move || {
        translator.borrow_mut().cycle();
    });

    match button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        Ok(()) => {
            on_click.forget();
            info!("Language switch attached to #{}", LANG_BUTTON_ID);
        }
        Err(e) => warn!("Failed to attach language switch: {:?}", e),
    }
}
