use thiserror::Error;

/// Errors that can occur while loading plugin configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML options block could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Non-fatal problems found while coercing plugin options.
///
/// Each warning means a default value was used (or an entry dropped) in
/// place of what the host supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The options value itself was not a mapping.
    NotAMapping {
        /// JSON type name of the value received.
        found: &'static str,
    },
    /// An option had the wrong type.
    WrongType {
        /// Option key as supplied by the host.
        key: String,
        /// Expected type description.
        expected: &'static str,
        /// JSON type name of the value received.
        found: &'static str,
    },
    /// An option had the right type but an unusable value.
    Invalid {
        /// Option key as supplied by the host.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
    /// An option key that the plugin does not recognize.
    UnknownOption {
        /// Option key as supplied by the host.
        key: String,
    },
}

impl ConfigWarning {
    /// Option key the warning refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigWarning::NotAMapping { .. } => None,
            ConfigWarning::WrongType { key, .. }
            | ConfigWarning::Invalid { key, .. }
            | ConfigWarning::UnknownOption { key } => Some(key),
        }
    }

    /// Short machine-readable kind, used by the bindings.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigWarning::NotAMapping { .. } => "not_a_mapping",
            ConfigWarning::WrongType { .. } => "wrong_type",
            ConfigWarning::Invalid { .. } => "invalid",
            ConfigWarning::UnknownOption { .. } => "unknown_option",
        }
    }
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::NotAMapping { found } => {
                write!(f, "plugin options must be a mapping, got {}", found)
            }
            ConfigWarning::WrongType {
                key,
                expected,
                found,
            } => write!(
                f,
                "option '{}' expects {}, got {}; using default",
                key, expected, found
            ),
            ConfigWarning::Invalid { key, message } => {
                write!(f, "option '{}' is invalid: {}", key, message)
            }
            ConfigWarning::UnknownOption { key } => write!(f, "unknown option '{}'", key),
        }
    }
}

/// Collection of configuration warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Warnings in the order they were found.
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    /// Create an empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning
    pub fn add(&mut self, warning: ConfigWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Logs every warning at `warn` level.
    pub fn log(&self) {
        for warning in &self.warnings {
            log::warn!("extlink: {}", warning);
        }
    }
}

/// JSON type name used in diagnostics.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "mapping",
    }
}
