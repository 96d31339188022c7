#![deny(missing_docs)]
//! extlink rewrite engine: lol_html handlers, page annotation, and the plugin hook.

/// Page-level annotation entry points.
pub mod annotate;
/// lol_html element and text handlers.
pub mod handlers;
/// Per-page plugin hook.
pub mod plugin;

pub use annotate::{AnnotateError, Annotated, LinkAnnotator, LinkStats, annotate, try_annotate};
pub use extlink_core::{ConfigDiagnostics, ConfigWarning, LinkConfig, LinkOptions};
pub use handlers::{LinkHandlers, anchor_handler, noscript_handler};
pub use plugin::{ExternalLinkPlugin, PLUGIN_ID, PageContext};
