use extlink_core::{ConfigDiagnostics, ConfigWarning, DEFAULT_SCHEMES, LinkConfig};
use extlink_rewrite::{ExternalLinkPlugin, PLUGIN_ID, PageContext};
use serde::Serialize;
use serde_json::Value as JsonValue;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Options
// ============================================================================

/// Converts a JS options object into a resolved configuration.
///
/// `undefined`/`null` mean defaults. Values serde cannot read at all also
/// fall back to defaults, with a warning.
fn parse_options(options: JsValue) -> (LinkConfig, ConfigDiagnostics) {
    if options.is_undefined() || options.is_null() {
        return (LinkConfig::default(), ConfigDiagnostics::new());
    }
    match serde_wasm_bindgen::from_value::<JsonValue>(options) {
        Ok(value) => LinkConfig::from_options(&value),
        Err(err) => {
            log::debug!("extlink: unreadable plugin options: {}", err);
            let mut diagnostics = ConfigDiagnostics::new();
            diagnostics.add(ConfigWarning::NotAMapping {
                found: "an unreadable value",
            });
            (LinkConfig::default(), diagnostics)
        }
    }
}

fn warning_messages(diagnostics: &ConfigDiagnostics) -> Vec<String> {
    diagnostics.warnings.iter().map(|w| w.to_string()).collect()
}

// ============================================================================
// Annotate API Types
// ============================================================================

/// Per-page link counters.
#[derive(Debug, Clone, Serialize)]
pub struct LinkStats {
    pub anchors: usize,
    pub empty_href: usize,
    pub external: usize,
    pub classes_added: usize,
}

/// Result of annotating one page.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotateResult {
    /// Rewritten HTML.
    pub html: String,
    /// Link counters for the page.
    pub stats: LinkStats,
    /// Option warnings, one message per fallback.
    pub warnings: Vec<String>,
}

// ============================================================================
// Annotate API
// ============================================================================

/// Identifier the host plugin registry resolves to this plugin.
#[wasm_bindgen]
pub fn plugin_id() -> String {
    PLUGIN_ID.to_string()
}

/// Scheme prefixes recognized before any `additional_schemes` are added.
#[wasm_bindgen]
pub fn default_schemes() -> js_sys::Array {
    DEFAULT_SCHEMES
        .iter()
        .map(|scheme| JsValue::from_str(scheme))
        .collect()
}

/// Annotates external links in one rendered page. Never throws.
///
/// # Arguments
///
/// * `html` - The rendered page HTML
/// * `options` - Optional plugin options (`class_name`, `target`, `rel`,
///   `additional_schemes`)
#[wasm_bindgen]
pub fn annotate(html: &str, options: JsValue) -> String {
    let (config, diagnostics) = parse_options(options);
    diagnostics.log();
    extlink_rewrite::annotate(html, &config)
}

/// Annotates one page and returns `{ html, stats, warnings }`.
#[wasm_bindgen]
pub fn annotate_with_stats(html: &str, options: JsValue) -> Result<JsValue, JsError> {
    let (config, diagnostics) = parse_options(options);
    let warnings = warning_messages(&diagnostics);
    let plugin = ExternalLinkPlugin::new(config);
    let (html, stats) = plugin.process_page(html, &PageContext::default());

    let result = AnnotateResult {
        html,
        stats: LinkStats {
            anchors: stats.anchors,
            empty_href: stats.empty_href,
            external: stats.external,
            classes_added: stats.classes_added,
        },
        warnings,
    };

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Returns the options in effect after defaults and coercion.
#[wasm_bindgen]
pub fn resolve_options(options: JsValue) -> Result<JsValue, JsError> {
    let (config, diagnostics) = parse_options(options);
    diagnostics.log();
    serde_wasm_bindgen::to_value(&config.to_options())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
