//! Plugin configuration: defaults, builders, and lenient option coercion.

use crate::error::{ConfigDiagnostics, ConfigError, ConfigWarning, json_type_name};
use crate::scheme::SchemeSet;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Class appended to external anchors when none is configured.
pub const DEFAULT_CLASS_NAME: &str = "external";

/// Option keys accepted for the class name, in order of preference.
const CLASS_NAME_KEYS: &[&str] = &["class_name", "className", "external_link_class_name"];
/// Option keys accepted for the target attribute value.
const TARGET_KEYS: &[&str] = &["target"];
/// Option keys accepted for the relationship values.
const REL_KEYS: &[&str] = &["rel"];
/// Option keys accepted for extra external schemes.
const SCHEME_KEYS: &[&str] = &["additional_schemes", "additionalSchemes"];

/// Resolved configuration for the link annotator.
///
/// Built once per build run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    class_name: String,
    target: String,
    rel: Vec<String>,
    additional_schemes: Vec<String>,
    schemes: SchemeSet,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            target: String::new(),
            rel: Vec::new(),
            additional_schemes: Vec::new(),
            schemes: SchemeSet::default(),
        }
    }
}

impl LinkConfig {
    /// Preset that opens external links in a new browsing context without
    /// exposing the opener or the referrer.
    ///
    /// ```
    /// use extlink_core::LinkConfig;
    ///
    /// let config = LinkConfig::new_tab();
    /// assert_eq!(config.target(), "_blank");
    /// assert_eq!(config.rel_value().as_deref(), Some("noopener noreferrer"));
    /// ```
    pub fn new_tab() -> Self {
        Self::default()
            .with_target("_blank")
            .with_rel(["noopener", "noreferrer"])
    }

    /// Sets the class appended to external anchors.
    ///
    /// Values that are empty or contain whitespace are rejected (logged) and
    /// the current class name is kept.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        match validate_class_name(&class_name) {
            Ok(()) => self.class_name = class_name,
            Err(message) => {
                log::warn!("extlink: ignoring class name {:?}: {}", class_name, message)
            }
        }
        self
    }

    /// Sets the `target` attribute value, written as given. An empty or
    /// whitespace-only value disables it.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Sets the `rel` values. Each entry may itself hold several
    /// space-separated tokens; empty entries are dropped.
    pub fn with_rel<I, S>(mut self, rel: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rel = rel
            .into_iter()
            .flat_map(|value| {
                value
                    .as_ref()
                    .split_ascii_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        self
    }

    /// Extends the default scheme set with extra prefixes.
    pub fn with_additional_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for scheme in schemes {
            let scheme = scheme.into().trim().to_string();
            if scheme.is_empty() || self.additional_schemes.contains(&scheme) {
                continue;
            }
            self.schemes.insert(scheme.clone());
            self.additional_schemes.push(scheme);
        }
        self
    }

    /// Class appended to external anchors.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Configured `target` value, as supplied.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The `target` attribute value to write, if any.
    pub fn target_value(&self) -> Option<&str> {
        if self.target.trim().is_empty() {
            None
        } else {
            Some(&self.target)
        }
    }

    /// Configured `rel` tokens; empty when disabled.
    pub fn rel(&self) -> &[String] {
        &self.rel
    }

    /// The `rel` attribute value to write, if any.
    pub fn rel_value(&self) -> Option<String> {
        if self.rel.is_empty() {
            None
        } else {
            Some(self.rel.join(" "))
        }
    }

    /// Extra schemes supplied by configuration.
    pub fn additional_schemes(&self) -> &[String] {
        &self.additional_schemes
    }

    /// Full set of prefixes that classify a link as external.
    pub fn schemes(&self) -> &SchemeSet {
        &self.schemes
    }

    /// Returns true when `href` is an external address.
    pub fn is_external(&self, href: &str) -> bool {
        self.schemes.matches(href)
    }

    /// Builds a configuration from a host options mapping.
    ///
    /// Never fails: missing options use defaults, and wrong-typed or invalid
    /// options fall back to defaults with a warning in the returned diagnostics.
    ///
    /// ```
    /// use extlink_core::LinkConfig;
    /// use serde_json::json;
    ///
    /// let (config, diagnostics) = LinkConfig::from_options(&json!({
    ///     "class_name": "ext",
    ///     "target": "_blank",
    ///     "rel": ["noopener"],
    /// }));
    /// assert!(!diagnostics.has_warnings());
    /// assert_eq!(config.class_name(), "ext");
    /// assert_eq!(config.rel_value().as_deref(), Some("noopener"));
    /// ```
    pub fn from_options(options: &JsonValue) -> (Self, ConfigDiagnostics) {
        let mut diagnostics = ConfigDiagnostics::new();
        let mut config = Self::default();

        let map = match options {
            JsonValue::Null => return (config, diagnostics),
            JsonValue::Object(map) => map,
            other => {
                diagnostics.add(ConfigWarning::NotAMapping {
                    found: json_type_name(other),
                });
                return (config, diagnostics);
            }
        };

        let known = [CLASS_NAME_KEYS, TARGET_KEYS, REL_KEYS, SCHEME_KEYS];
        for key in map.keys() {
            if !known.iter().any(|keys| keys.contains(&key.as_str())) {
                diagnostics.add(ConfigWarning::UnknownOption { key: key.clone() });
            }
        }

        if let Some((key, value)) = lookup(map, CLASS_NAME_KEYS) {
            match value {
                JsonValue::String(s) => {
                    let trimmed = s.trim();
                    match validate_class_name(trimmed) {
                        Ok(()) => config.class_name = trimmed.to_string(),
                        Err(message) => diagnostics.add(ConfigWarning::Invalid {
                            key: key.to_string(),
                            message: message.to_string(),
                        }),
                    }
                }
                other => diagnostics.add(wrong_type(key, "a string", other)),
            }
        }

        if let Some((key, value)) = lookup(map, TARGET_KEYS) {
            match value {
                JsonValue::String(s) => config.target = s.clone(),
                other => diagnostics.add(wrong_type(key, "a string", other)),
            }
        }

        if let Some((key, value)) = lookup(map, REL_KEYS)
            && let Some(values) = string_list(key, value, &mut diagnostics)
        {
            config = config.with_rel(values);
        }

        if let Some((key, value)) = lookup(map, SCHEME_KEYS)
            && let Some(values) = string_list(key, value, &mut diagnostics)
        {
            let (kept, empty): (Vec<String>, Vec<String>) = values
                .into_iter()
                .partition(|scheme| !scheme.trim().is_empty());
            if !empty.is_empty() {
                diagnostics.add(ConfigWarning::Invalid {
                    key: key.to_string(),
                    message: "empty scheme entries would match every link; dropped".to_string(),
                });
            }
            config = config.with_additional_schemes(kept);
        }

        (config, diagnostics)
    }

    /// Parses a YAML options block, then applies [`LinkConfig::from_options`].
    ///
    /// Only YAML syntax errors fail; value problems become diagnostics.
    pub fn from_yaml_str(yaml: &str) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        if yaml.trim().is_empty() {
            return Ok((Self::default(), ConfigDiagnostics::new()));
        }
        let value: JsonValue = serde_yaml::from_str(yaml)?;
        Ok(Self::from_options(&value))
    }

    /// Snapshot of the resolved options, suitable for serialization.
    pub fn to_options(&self) -> LinkOptions {
        LinkOptions {
            class_name: self.class_name.clone(),
            target: self.target.clone(),
            rel: self.rel.clone(),
            additional_schemes: self.additional_schemes.clone(),
        }
    }
}

/// Serializable view of a resolved [`LinkConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkOptions {
    /// Class appended to external anchors.
    pub class_name: String,
    /// `target` attribute value; empty when disabled.
    pub target: String,
    /// `rel` tokens; empty when disabled.
    pub rel: Vec<String>,
    /// Extra schemes on top of the defaults.
    pub additional_schemes: Vec<String>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        LinkConfig::default().to_options()
    }
}

impl From<LinkOptions> for LinkConfig {
    fn from(options: LinkOptions) -> Self {
        LinkConfig::default()
            .with_class_name(options.class_name)
            .with_target(options.target)
            .with_rel(options.rel)
            .with_additional_schemes(options.additional_schemes)
    }
}

fn validate_class_name(class_name: &str) -> Result<(), &'static str> {
    if class_name.is_empty() {
        Err("class name must not be empty")
    } else if class_name.chars().any(char::is_whitespace) {
        Err("class name must be a single token without whitespace")
    } else {
        Ok(())
    }
}

/// Returns the first non-null option among `keys`, in priority order.
fn lookup<'a>(
    map: &'a serde_json::Map<String, JsonValue>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a JsonValue)> {
    keys.iter()
        .find_map(|&key| map.get(key).filter(|v| !v.is_null()).map(|v| (key, v)))
}

fn wrong_type(key: &str, expected: &'static str, found: &JsonValue) -> ConfigWarning {
    ConfigWarning::WrongType {
        key: key.to_string(),
        expected,
        found: json_type_name(found),
    }
}

/// Reads a sequence of strings, also accepting a single string.
///
/// Non-string entries are dropped with a warning.
fn string_list(
    key: &str,
    value: &JsonValue,
    diagnostics: &mut ConfigDiagnostics,
) -> Option<Vec<String>> {
    match value {
        JsonValue::String(s) => Some(vec![s.clone()]),
        JsonValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    JsonValue::String(s) => out.push(s.clone()),
                    other => diagnostics.add(ConfigWarning::Invalid {
                        key: key.to_string(),
                        message: format!(
                            "entry {} is {}, expected a string; dropped",
                            index,
                            json_type_name(other)
                        ),
                    }),
                }
            }
            Some(out)
        }
        other => {
            diagnostics.add(wrong_type(key, "a sequence of strings", other));
            None
        }
    }
}
