//! Address scheme classification.

/// Scheme prefixes that mark a link as external unless configuration adds more.
pub const DEFAULT_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "mailto:", "tel:"];

/// Ordered, de-duplicated set of address prefixes that classify a link as external.
///
/// Matching is a plain, case-sensitive prefix test against the raw `href` value.
///
/// # Examples
///
/// ```
/// use extlink_core::SchemeSet;
///
/// let schemes = SchemeSet::default();
/// assert!(schemes.matches("https://example.com"));
/// assert!(schemes.matches("mailto:someone@example.com"));
/// assert!(!schemes.matches("/guide/install/"));
/// assert!(!schemes.matches("HTTPS://EXAMPLE.COM"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSet {
    prefixes: Vec<String>,
}

impl SchemeSet {
    /// Creates an empty set that matches nothing.
    pub fn empty() -> Self {
        Self {
            prefixes: Vec::new(),
        }
    }

    /// Creates the default set extended with `additional` prefixes.
    ///
    /// Empty prefixes are ignored since they would match every address.
    pub fn with_additional<I, S>(additional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.extend(additional);
        set
    }

    /// Adds a prefix, returning `false` when it was empty or already present.
    pub fn insert(&mut self, prefix: impl Into<String>) -> bool {
        let prefix = prefix.into();
        if prefix.is_empty() || self.prefixes.contains(&prefix) {
            return false;
        }
        self.prefixes.push(prefix);
        true
    }

    /// Adds every prefix from the iterator.
    pub fn extend<I, S>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in prefixes {
            self.insert(prefix);
        }
    }

    /// Returns true when `href` starts with any recognized prefix.
    pub fn matches(&self, href: &str) -> bool {
        self.prefixes.iter().any(|p| href.starts_with(p.as_str()))
    }

    /// Iterates the prefixes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Number of recognized prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the set has no prefixes.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for SchemeSet {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
