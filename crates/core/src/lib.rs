#![deny(missing_docs)]
//! extlink core: plugin configuration, scheme classification, and class-list coercion.

/// Ordered class token lists.
pub mod class_list;
/// Plugin configuration and option coercion.
pub mod config;
/// Core error and diagnostic types.
pub mod error;
/// Address scheme classification.
pub mod scheme;

pub use class_list::ClassList;
pub use config::{DEFAULT_CLASS_NAME, LinkConfig, LinkOptions};
pub use error::{ConfigDiagnostics, ConfigError, ConfigWarning};
pub use scheme::{DEFAULT_SCHEMES, SchemeSet};
