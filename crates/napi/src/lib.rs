#![deny(missing_docs)]
//! Node.js bindings that surface extlink's Rust implementation.

use extlink_core::{ConfigDiagnostics, LinkConfig};
use extlink_rewrite::PLUGIN_ID;
use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// The stateful processor used by site generator hooks.
pub mod processor;
/// NAPI-exposed data structures.
pub mod types;
/// Utility helpers.
mod utils;

pub use processor::ExternalLinkProcessor;
pub use types::*;

/// Identifier the host plugin registry resolves to this plugin.
#[napi(js_name = "pluginId")]
pub fn plugin_id() -> String {
    PLUGIN_ID.to_string()
}

/// Annotates external links in a single HTML string.
///
/// Resolves `options` on every call; hosts processing many pages should keep
/// an `ExternalLinkProcessor` instead. Never throws: invalid options fall back
/// to defaults and malformed HTML is passed through.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { annotateHtml } = require('extlink-napi');
///
/// annotateHtml('<a href="https://example.com">x</a>', { target: '_blank' });
/// // '<a href="https://example.com" class="external" target="_blank">x</a>'
/// ```
#[napi(js_name = "annotateHtml")]
pub fn annotate_html(html: String, options: Option<JsonValue>) -> String {
    let (config, diagnostics) = LinkConfig::from_options(&options.unwrap_or(JsonValue::Null));
    diagnostics.log();
    extlink_rewrite::annotate(&html, &config)
}

/// Resolves a plugin options object without processing any HTML.
#[napi(js_name = "parseOptions")]
pub fn parse_options(options: Option<JsonValue>) -> ParseOptionsResult {
    let (config, diagnostics) = LinkConfig::from_options(&options.unwrap_or(JsonValue::Null));
    options_result(&config, &diagnostics)
}

/// Resolves a YAML plugin options block, as found in a site config file.
#[napi(js_name = "parseOptionsYaml")]
pub fn parse_options_yaml(yaml: String) -> napi::Result<ParseOptionsResult> {
    let (config, diagnostics) = LinkConfig::from_yaml_str(&yaml)
        .map_err(|e| Error::from_reason(format!("Failed to parse plugin options: {}", e)))?;
    Ok(options_result(&config, &diagnostics))
}

fn options_result(config: &LinkConfig, diagnostics: &ConfigDiagnostics) -> ParseOptionsResult {
    ParseOptionsResult {
        options: ResolvedOptions::from(config),
        warnings: diagnostics
            .warnings
            .iter()
            .map(ConfigWarningEntry::from)
            .collect(),
    }
}
