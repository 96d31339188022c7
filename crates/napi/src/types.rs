//! NAPI-exposed data structures.

use extlink_core::{ConfigWarning, LinkConfig};
use extlink_rewrite::LinkStats;
use napi_derive::napi;

/// Options as resolved after defaults and coercion.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    /// Class appended to external anchors.
    pub class_name: String,
    /// `target` attribute value (empty when disabled).
    pub target: String,
    /// `rel` tokens (empty when disabled).
    pub rel: Vec<String>,
    /// Extra schemes on top of the defaults.
    pub additional_schemes: Vec<String>,
    /// Every prefix that classifies a link as external.
    pub schemes: Vec<String>,
}

impl From<&LinkConfig> for ResolvedOptions {
    fn from(config: &LinkConfig) -> Self {
        Self {
            class_name: config.class_name().to_string(),
            target: config.target().to_string(),
            rel: config.rel().to_vec(),
            additional_schemes: config.additional_schemes().to_vec(),
            schemes: config.schemes().iter().map(str::to_string).collect(),
        }
    }
}

/// Option coercion warning returned from Rust.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ConfigWarningEntry {
    /// Warning kind (e.g., "wrong_type", "unknown_option").
    pub kind: String,
    /// Option key the warning refers to.
    pub key: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl From<&ConfigWarning> for ConfigWarningEntry {
    fn from(warning: &ConfigWarning) -> Self {
        Self {
            kind: warning.kind().to_string(),
            key: warning.key().map(str::to_string),
            message: warning.to_string(),
        }
    }
}

/// Result of resolving plugin options.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ParseOptionsResult {
    /// The resolved options.
    pub options: ResolvedOptions,
    /// Warnings for options that fell back to defaults.
    pub warnings: Vec<ConfigWarningEntry>,
}

/// Per-page link counters.
#[napi(object)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStatsEntry {
    /// Anchors carrying an `href` attribute.
    pub anchors: u32,
    /// Anchors skipped because their `href` was empty.
    pub empty_href: u32,
    /// Anchors classified as external.
    pub external: u32,
    /// External anchors that received the class.
    pub classes_added: u32,
}

impl From<LinkStats> for LinkStatsEntry {
    fn from(stats: LinkStats) -> Self {
        Self {
            anchors: saturate(stats.anchors),
            empty_href: saturate(stats.empty_href),
            external: saturate(stats.external),
            classes_added: saturate(stats.classes_added),
        }
    }
}

/// JS numbers carry `u32` counters; larger counts clamp instead of wrapping.
fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Rewritten page plus its counters.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct AnnotateResult {
    /// Rewritten HTML.
    pub html: String,
    /// Link counters for the page.
    pub stats: LinkStatsEntry,
}
