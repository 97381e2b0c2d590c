//! Option values and tri-state (`yes`/`no`/`auto`) validation.
//!
//! Options arrive as already-parsed `key = value` strings.  Tri-state options
//! are checked against an allow-list and an implemented subset, and their
//! aliases (`true`, `off`, `1`, …) are rewritten to the canonical group name
//! so later stages only ever see `yes`, `no` or `auto`.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};

/// Key of the document root option.
pub const DOCUMENT_ROOT: &str = "document-root";
/// Key of the parts directory option (base of the document root default).
pub const PARTS_DIRECTORY: &str = "parts-directory";
/// Key of the leaf-linking option.
pub const LINK_LEAVES: &str = "link-leaves";
/// Key of the relative-target option.
pub const RELATIVE_LINKS: &str = "relative-links";

/// A canonical tri-state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ternary {
    /// Enabled.
    Yes,
    /// Disabled.
    No,
    /// Decide automatically.
    Auto,
}

impl Ternary {
    /// Every group, in matching order.
    pub const ALL: [Self; 3] = [Self::Yes, Self::No, Self::Auto];

    /// Canonical spelling of this group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Auto => "auto",
        }
    }

    /// Boolean view: `Some(true)`, `Some(false)` or `None` for `auto`.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Yes => Some(true),
            Self::No => Some(false),
            Self::Auto => None,
        }
    }
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted spellings per tri-state group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TernaryTable {
    yes: Vec<&'static str>,
    no: Vec<&'static str>,
    auto: Vec<&'static str>,
}

impl Default for TernaryTable {
    fn default() -> Self {
        Self {
            yes: vec!["yes", "true", "on", "1", "sure"],
            no: vec!["no", "false", "off", "0", "nope"],
            auto: vec!["auto"],
        }
    }
}

impl TernaryTable {
    /// Build a table from explicit alias lists.
    #[must_use]
    pub const fn new(
        yes: Vec<&'static str>,
        no: Vec<&'static str>,
        auto: Vec<&'static str>,
    ) -> Self {
        Self { yes, no, auto }
    }

    /// Accepted spellings of `group`.
    #[must_use]
    pub fn aliases(&self, group: Ternary) -> &[&'static str] {
        match group {
            Ternary::Yes => &self.yes,
            Ternary::No => &self.no,
            Ternary::Auto => &self.auto,
        }
    }

    /// Find the group whose canonical name or alias equals `value`.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_links::config::options::{Ternary, TernaryTable};
    ///
    /// let table = TernaryTable::default();
    /// assert_eq!(table.lookup(" On "), Some(Ternary::Yes));
    /// assert_eq!(table.lookup("nope"), Some(Ternary::No));
    /// assert_eq!(table.lookup("sometimes"), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, value: &str) -> Option<Ternary> {
        let value = value.trim().to_lowercase();
        Ternary::ALL.into_iter().find(|group| {
            value == group.as_str() || self.aliases(*group).iter().any(|a| *a == value)
        })
    }
}

/// Per-key default values applied when an option is absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults(BTreeMap<&'static str, &'static str>);

impl Default for Defaults {
    fn default() -> Self {
        Self(BTreeMap::from([(RELATIVE_LINKS, "no"), (LINK_LEAVES, "no")]))
    }
}

impl Defaults {
    /// An empty defaults table.
    #[must_use]
    pub const fn none() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace the default for `key`.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: &'static str) -> Self {
        self.0.insert(key, value);
        self
    }

    /// Default for `key`, if one is defined.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.0.get(key).copied()
    }
}

/// Raw option values for one run, keyed by option name.
///
/// Ordered so that listings and diagnostics are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    /// Create an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, treating an empty string as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate over all `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Check `options[key]` with the standard alias and defaults tables.
///
/// See [`check_ternary_value_with`].
///
/// # Errors
///
/// Returns a [`ConfigError`] if the value is missing without default,
/// malformed, not allowed, or not implemented.
pub fn check_ternary_value(
    key: &str,
    options: &mut Options,
    allowed: &[Ternary],
    implemented: &[Ternary],
) -> Result<Ternary, ConfigError> {
    check_ternary_value_with(
        key,
        options,
        allowed,
        implemented,
        &Defaults::default(),
        &TernaryTable::default(),
    )
}

/// Check `options[key]` for an allowed value and normalise it in place.
///
/// An absent or empty value falls back to `defaults`.  On success the
/// canonical group name is written back to `options` and returned.
///
/// `implemented` is expected to be a subset of `allowed`: a value may be
/// allowed but not yet implemented.
///
/// # Errors
///
/// - [`ConfigError::MissingValue`] if there is neither a value nor a default
/// - [`ConfigError::NotAllowed`] if the value matches no allowed group
/// - [`ConfigError::NotImplemented`] if it matches an allowed group that is
///   not implemented
pub fn check_ternary_value_with(
    key: &str,
    options: &mut Options,
    allowed: &[Ternary],
    implemented: &[Ternary],
    defaults: &Defaults,
    values: &TernaryTable,
) -> Result<Ternary, ConfigError> {
    let raw = match options.get(key) {
        Some(v) => v.to_string(),
        None => defaults
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingValue {
                key: key.to_string(),
            })?,
    };

    let group = values
        .lookup(&raw)
        .filter(|g| allowed.contains(g))
        .ok_or_else(|| ConfigError::NotAllowed {
            key: key.to_string(),
            value: raw.clone(),
        })?;

    if !implemented.contains(&group) {
        return Err(ConfigError::NotImplemented {
            key: key.to_string(),
            value: raw,
        });
    }

    options.set(key, group.as_str());
    Ok(group)
}

/// Convert validated option text to a ternary boolean.
///
/// Returns `Some(true)`, `Some(false)`, or `None` for `auto`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTernary`] for text that was never
/// validated by [`check_ternary_value`].
pub fn ternary_bool(value: &str) -> Result<Option<bool>, ValidationError> {
    TernaryTable::default()
        .lookup(value)
        .map(Ternary::as_bool)
        .ok_or_else(|| ValidationError::InvalidTernary {
            value: value.to_string(),
        })
}
