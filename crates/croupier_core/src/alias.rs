//! Ordered alias substitution for search strings.

use serde::{Deserialize, Serialize};

/// A single literal substitution: occurrences of `alias` become `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alias {
    /// Substring to look for in the search
    pub alias: String,
    /// Text that replaces every occurrence of `alias`
    pub replacement: String,
}

impl Alias {
    /// Creates a new alias entry.
    pub fn new(alias: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered table of alias substitutions.
///
/// Entries are applied in declaration order. Each replacement value is produced
/// at most once per query: once an entry mapping to `cat` fired, later entries
/// mapping to `cat` are skipped even if their alias is present.
///
/// # Examples
///
/// ```
/// use croupier_core::{Alias, AliasTable};
///
/// let table = AliasTable::new(vec![
///     Alias::new("kitten", "cat"),
///     Alias::new("feline", "cat"),
/// ]);
/// assert_eq!(table.apply("kitten feline"), "cat feline");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: Vec<Alias>,
}

impl AliasTable {
    /// Creates a table from entries in application order.
    pub fn new(entries: Vec<Alias>) -> Self {
        Self { entries }
    }

    /// Appends entries after the existing ones.
    ///
    /// Entries whose alias is already present are ignored so the first
    /// declaration of an alias wins.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = Alias>) {
        for entry in entries {
            if !self.entries.iter().any(|e| e.alias == entry.alias) {
                self.entries.push(entry);
            }
        }
    }

    /// Entries in application order.
    pub fn entries(&self) -> &[Alias] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies the table to a search string.
    pub fn apply(&self, search: &str) -> String {
        let mut result = search.to_string();
        let mut produced: Vec<&str> = Vec::new();

        for entry in &self.entries {
            if entry.alias.is_empty() {
                continue;
            }
            if result.contains(entry.alias.as_str())
                && !produced.contains(&entry.replacement.as_str())
            {
                produced.push(entry.replacement.as_str());
                result = result.replace(entry.alias.as_str(), &entry.replacement);
                tracing::trace!(
                    alias = %entry.alias,
                    replacement = %entry.replacement,
                    "Applied alias"
                );
            }
        }

        result
    }
}

impl FromIterator<Alias> for AliasTable {
    fn from_iter<I: IntoIterator<Item = Alias>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
