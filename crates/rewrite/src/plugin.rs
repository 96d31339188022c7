//! Page hook that a site generator calls once per rendered page.

use crate::annotate::{LinkAnnotator, LinkStats};
use extlink_core::{ConfigDiagnostics, ConfigError, LinkConfig};
use serde_json::Value as JsonValue;

/// Identifier under which hosts register the plugin.
pub const PLUGIN_ID: &str = "mkdocs_external_link_processor";

/// Host metadata about the page being processed.
///
/// Only used to label log messages; annotation never depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Public URL of the page.
    pub url: Option<String>,
    /// Source file the page was rendered from.
    pub source_path: Option<String>,
}

impl PageContext {
    /// Context with a URL only.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            source_path: None,
        }
    }

    /// Best label for logs: the source path, then the URL.
    pub fn label(&self) -> &str {
        self.source_path
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or("<page>")
    }
}

/// External link processor plugin.
///
/// Configuration is resolved once at construction; the instance can then be
/// shared read-only for the rest of the build.
#[derive(Debug, Clone, Default)]
pub struct ExternalLinkPlugin {
    annotator: LinkAnnotator,
    diagnostics: ConfigDiagnostics,
}

impl ExternalLinkPlugin {
    /// Creates the plugin from an already resolved configuration.
    pub fn new(config: LinkConfig) -> Self {
        Self {
            annotator: LinkAnnotator::new(config),
            diagnostics: ConfigDiagnostics::new(),
        }
    }

    /// Creates the plugin from a host options mapping, logging any warnings.
    pub fn from_options(options: &JsonValue) -> Self {
        let (config, diagnostics) = LinkConfig::from_options(options);
        Self::with_diagnostics(config, diagnostics)
    }

    /// Creates the plugin from a YAML options block.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let (config, diagnostics) = LinkConfig::from_yaml_str(yaml)?;
        Ok(Self::with_diagnostics(config, diagnostics))
    }

    fn with_diagnostics(config: LinkConfig, diagnostics: ConfigDiagnostics) -> Self {
        diagnostics.log();
        Self {
            annotator: LinkAnnotator::new(config),
            diagnostics,
        }
    }

    /// The resolved configuration.
    pub fn config(&self) -> &LinkConfig {
        self.annotator.config()
    }

    /// Warnings produced while resolving the options.
    pub fn diagnostics(&self) -> &ConfigDiagnostics {
        &self.diagnostics
    }

    /// Rewrites one rendered page. Never fails.
    pub fn on_page_content(&self, html: &str, page: &PageContext) -> String {
        self.process_page(html, page).0
    }

    /// Rewrites one rendered page and reports its link counters.
    ///
    /// On rewriter failure the page is returned unchanged with zero counters.
    pub fn process_page(&self, html: &str, page: &PageContext) -> (String, LinkStats) {
        match self.annotator.try_annotate(html) {
            Ok(annotated) => {
                log::debug!(
                    "extlink: {}: {} anchors, {} external, {} classes added",
                    page.label(),
                    annotated.stats.anchors,
                    annotated.stats.external,
                    annotated.stats.classes_added
                );
                (annotated.html, annotated.stats)
            }
            Err(err) => {
                log::warn!("extlink: {}: leaving page unchanged: {}", page.label(), err);
                (html.to_string(), LinkStats::default())
            }
        }
    }
}
