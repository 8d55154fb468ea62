//! Command parsing: keyword check, alias substitution, tokenization.

use crate::AliasTable;
use croupier_error::{ParseError, ParseErrorKind};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Normalized search derived from one chat command.
///
/// # Examples
///
/// ```
/// use croupier_core::SearchQuery;
///
/// let query = SearchQuery::new("black  dog");
/// assert_eq!(query.as_str(), "black dog");
/// assert_eq!(query.tokens(), ["black", "dog"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchQuery {
    search: String,
    tokens: Vec<String>,
}

impl SearchQuery {
    /// Builds a query from an already-substituted search string.
    pub fn new(search: &str) -> Self {
        let tokens: Vec<String> = search
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self {
            search: tokens.join(" "),
            tokens,
        }
    }

    /// The search string, tokens joined by single spaces.
    pub fn as_str(&self) -> &str {
        &self.search
    }

    /// Search tokens used for filtering.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether the command carried no search terms.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.search)
    }
}

/// Parses a raw command into a [`SearchQuery`].
///
/// The text is lower-cased and split on whitespace. The first token must equal
/// `keyword`; the rest is rejoined and run through `aliases`.
///
/// # Errors
///
/// Returns [`ParseErrorKind::KeywordMissing`] when the text is empty or starts
/// with anything other than the keyword.
///
/// # Examples
///
/// ```
/// use croupier_core::{AliasTable, parse_command};
///
/// let query = parse_command("Post Big Dog", "post", &AliasTable::default()).unwrap();
/// assert_eq!(query.tokens(), ["big", "dog"]);
///
/// let err = parse_command("go dog", "post", &AliasTable::default()).unwrap_err();
/// assert!(err.guidance().contains("post"));
/// ```
pub fn parse_command(
    raw_text: &str,
    keyword: &str,
    aliases: &AliasTable,
) -> Result<SearchQuery, ParseError> {
    let lowered = raw_text.to_lowercase();
    let keyword = keyword.to_lowercase();
    let mut words = lowered.split_whitespace();

    match words.next() {
        Some(first) if first == keyword => {}
        _ => return Err(ParseError::new(ParseErrorKind::KeywordMissing(keyword))),
    }

    let search = words.collect::<Vec<_>>().join(" ");
    let substituted = aliases.apply(&search);
    debug!(search = %search, substituted = %substituted, "Parsed command");

    Ok(SearchQuery::new(&substituted))
}

/// Parser bound to a keyword and a shared alias table.
#[derive(Debug, Clone)]
pub struct QueryParser {
    keyword: String,
    aliases: Arc<AliasTable>,
}

impl QueryParser {
    /// Creates a parser for `keyword` using `aliases`.
    pub fn new(keyword: impl Into<String>, aliases: Arc<AliasTable>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            aliases,
        }
    }

    /// The keyword commands must start with.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The alias table applied to searches.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Parses a raw command.
    #[instrument(skip(self), fields(keyword = %self.keyword))]
    pub fn parse(&self, raw_text: &str) -> Result<SearchQuery, ParseError> {
        parse_command(raw_text, &self.keyword, &self.aliases)
    }
}
