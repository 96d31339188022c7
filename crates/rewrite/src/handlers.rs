//! lol_html element handlers that annotate external anchors.

use crate::annotate::{LinkStats, try_annotate};
use extlink_core::{ClassList, LinkConfig};
use html_escape::{decode_html_entities, encode_double_quoted_attribute};
use lol_html::html_content::ContentType;
use lol_html::Selector;
use lol_html::{ElementContentHandlers, element, text};
use std::borrow::Cow;
use std::cell::RefCell;

/// A selector paired with its element handlers, as lol_html expects them.
pub type Handler<'h> = (Cow<'static, Selector>, ElementContentHandlers<'h>);

/// Builder for aggregating element handlers before passing to lol_html.
///
/// Lets a host combine link annotation with its own rewriting in a single pass.
pub struct LinkHandlers<'h> {
    handlers: Vec<Handler<'h>>,
}

impl<'h> LinkHandlers<'h> {
    /// Creates an empty handler list.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Creates a list holding the anchor and `noscript` handlers for `config`.
    pub fn for_config(config: &'h LinkConfig, stats: &'h RefCell<LinkStats>) -> Self {
        let mut handlers = Self::new();
        handlers.push(anchor_handler(config, stats));
        handlers.push(noscript_handler(config, stats));
        handlers
    }

    /// Pushes a single handler tuple.
    pub fn push(&mut self, handler: Handler<'h>) {
        self.handlers.push(handler);
    }

    /// Extends the list with more handlers.
    pub fn extend(&mut self, handlers: Vec<Handler<'h>>) {
        self.handlers.extend(handlers);
    }

    /// Number of handlers collected so far.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers were collected.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Converts into the handler vector.
    pub fn into_vec(self) -> Vec<Handler<'h>> {
        self.handlers
    }
}

impl Default for LinkHandlers<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the handler that rewrites `a[href]` elements according to `config`.
///
/// External anchors get the configured class appended once. `target` and
/// `rel` are written to every anchor with an address whenever they are
/// configured. Counts are accumulated into `stats`.
///
/// Attribute values are compared after decoding character references, so
/// `&#109;ailto:` is classified like `mailto:`.
pub fn anchor_handler<'h>(config: &'h LinkConfig, stats: &'h RefCell<LinkStats>) -> Handler<'h> {
    let target = config
        .target_value()
        .map(|t| encode_double_quoted_attribute(t).into_owned());
    let rel = config
        .rel_value()
        .map(|r| encode_double_quoted_attribute(&r).into_owned());

    element!("a[href]", move |el| {
        let Some(raw_href) = el.get_attribute("href") else {
            return Ok(());
        };
        let mut stats = stats.borrow_mut();
        stats.anchors += 1;
        if raw_href.is_empty() {
            stats.empty_href += 1;
            return Ok(());
        }

        let href = decode_html_entities(&raw_href);
        if config.is_external(&href) {
            stats.external += 1;
            let raw_class = el.get_attribute("class");
            let decoded = raw_class.as_deref().map(decode_html_entities);
            let mut classes = ClassList::from_attribute(decoded.as_deref());
            if classes.push_unique(config.class_name()) {
                let value = classes.to_string();
                el.set_attribute("class", &encode_double_quoted_attribute(&value))?;
                stats.classes_added += 1;
            }
        }

        if let Some(target) = &target {
            el.set_attribute("target", target)?;
        }
        if let Some(rel) = &rel {
            el.set_attribute("rel", rel)?;
        }

        Ok(())
    })
}

/// Returns the handler that annotates anchors inside `<noscript>`.
///
/// lol_html reads `noscript` content as raw text, so the anchor handler never
/// sees those links. The text is buffered, annotated as a fragment of its own,
/// and written back as HTML in place of the last chunk.
pub fn noscript_handler<'h>(
    config: &'h LinkConfig,
    stats: &'h RefCell<LinkStats>,
) -> Handler<'h> {
    let mut buffer = String::new();

    text!("noscript", move |chunk| {
        buffer.push_str(chunk.as_str());
        if !chunk.last_in_text_node() {
            chunk.remove();
            return Ok(());
        }

        let inner = std::mem::take(&mut buffer);
        let annotated = try_annotate(&inner, config)?;
        stats.borrow_mut().add(annotated.stats);
        chunk.replace(&annotated.html, ContentType::Html);
        Ok(())
    })
}
