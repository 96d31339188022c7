//! The stateful processor that hosts keep for a whole build.

use crate::types::{AnnotateResult, ConfigWarningEntry, ResolvedOptions};
use crate::utils::page_context;
use extlink_rewrite::ExternalLinkPlugin;
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// External link processor exposed to Node callers.
///
/// Options are resolved once in the constructor and reused for every page.
#[napi]
pub struct ExternalLinkProcessor {
    pub(crate) plugin: ExternalLinkPlugin,
}

#[napi]
impl ExternalLinkProcessor {
    #[napi(constructor)]
    /// Creates a processor from a plugin options object.
    ///
    /// Missing or wrong-typed options fall back to defaults; see `warnings`.
    pub fn new(options: Option<JsonValue>) -> Self {
        Self {
            plugin: ExternalLinkPlugin::from_options(&options.unwrap_or(JsonValue::Null)),
        }
    }

    /// Page content hook: rewrites one rendered page and returns the HTML.
    ///
    /// The host's site config and file list are accepted for signature parity
    /// and ignored.
    #[napi(js_name = "onPageContent")]
    pub fn on_page_content(
        &self,
        html: String,
        page: Option<JsonValue>,
        _config: Option<JsonValue>,
        _files: Option<JsonValue>,
    ) -> String {
        self.plugin
            .on_page_content(&html, &page_context(page.as_ref()))
    }

    /// Rewrites one page and returns the HTML together with link counters.
    #[napi(js_name = "annotateWithStats")]
    pub fn annotate_with_stats(&self, html: String, page: Option<JsonValue>) -> AnnotateResult {
        let (html, stats) = self
            .plugin
            .process_page(&html, &page_context(page.as_ref()));
        AnnotateResult {
            html,
            stats: stats.into(),
        }
    }

    /// Warnings produced while resolving the constructor options.
    #[napi(getter)]
    pub fn warnings(&self) -> Vec<ConfigWarningEntry> {
        self.plugin
            .diagnostics()
            .warnings
            .iter()
            .map(ConfigWarningEntry::from)
            .collect()
    }

    /// The options in effect after defaults and coercion.
    #[napi(getter)]
    pub fn options(&self) -> ResolvedOptions {
        ResolvedOptions::from(self.plugin.config())
    }
}
