//! Ordered class token list read from a possibly missing `class` attribute.

use std::fmt;

/// Ordered list of class tokens.
///
/// Built from the raw attribute value with a fixed coercion rule: a missing
/// attribute, an empty value, or a whitespace-only value all become an empty
/// list. Anything else is split on ASCII whitespace, keeping source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Coerces an optional raw attribute value into a token list.
    ///
    /// ```
    /// use extlink_core::ClassList;
    ///
    /// assert!(ClassList::from_attribute(None).is_empty());
    /// assert!(ClassList::from_attribute(Some("   ")).is_empty());
    /// let list = ClassList::from_attribute(Some(" foo  bar "));
    /// assert_eq!(list.to_string(), "foo bar");
    /// ```
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let tokens = raw
            .map(|value| {
                value
                    .split_ascii_whitespace()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { tokens }
    }

    /// Returns true if `token` is already in the list.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Appends `token` unless present. Returns whether the list changed.
    pub fn push_unique(&mut self, token: &str) -> bool {
        if self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Iterates the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}
