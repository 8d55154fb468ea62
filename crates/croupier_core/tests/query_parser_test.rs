//! Tests for command parsing and alias substitution.

use croupier_core::{Alias, AliasTable, QueryParser, parse_command};
use croupier_error::ParseErrorKind;
use std::sync::Arc;

fn synonym_table() -> AliasTable {
    AliasTable::new(vec![
        Alias::new("kitten", "cat"),
        Alias::new("feline", "cat"),
        Alias::new("pup", "dog"),
    ])
}

#[test]
fn test_keyword_is_stripped_and_search_tokenized() {
    let query = parse_command("post black dog", "post", &AliasTable::default()).unwrap();
    assert_eq!(query.as_str(), "black dog");
    assert_eq!(query.tokens(), ["black", "dog"]);
}

#[test]
fn test_input_is_lowercased_and_whitespace_collapsed() {
    let query = parse_command("  POST   Black\tDOG ", "post", &AliasTable::default()).unwrap();
    assert_eq!(query.as_str(), "black dog");
}

#[test]
fn test_keyword_only_gives_empty_query() {
    let query = parse_command("post", "post", &AliasTable::default()).unwrap();
    assert!(query.is_empty());
    assert_eq!(query.as_str(), "");
}

#[test]
fn test_wrong_keyword_is_rejected_with_guidance() {
    let err = parse_command("go dog", "post", &AliasTable::default()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::KeywordMissing("post".to_string()));
    assert_eq!(err.guidance(), "post keyword not in message");
}

#[test]
fn test_empty_message_is_rejected() {
    let err = parse_command("   ", "post", &AliasTable::default()).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::KeywordMissing(_)));
}

#[test]
fn test_keyword_must_be_whole_first_word() {
    assert!(parse_command("poster dog", "post", &AliasTable::default()).is_err());
    assert!(parse_command("dog post", "post", &AliasTable::default()).is_err());
}

#[test]
fn test_shared_replacement_applies_only_once() {
    let query = parse_command("post kitten feline", "post", &synonym_table()).unwrap();
    assert_eq!(query.as_str(), "cat feline");
}

#[test]
fn test_alias_replaces_every_occurrence() {
    let query = parse_command("post pup and pup", "post", &synonym_table()).unwrap();
    assert_eq!(query.as_str(), "dog and dog");
}

#[test]
fn test_aliases_apply_in_table_order_not_input_order() {
    let query = parse_command("post feline kitten", "post", &synonym_table()).unwrap();
    // "kitten" is declared first, so it wins the "cat" replacement
    assert_eq!(query.as_str(), "feline cat");
}

#[test]
fn test_alias_matches_substrings() {
    let table = AliasTable::new(vec![Alias::new("bob", "robert")]);
    let query = parse_command("post bobby", "post", &table).unwrap();
    assert_eq!(query.as_str(), "robertby");
}

#[test]
fn test_multi_word_alias_expands_to_multiple_tokens() {
    let table = AliasTable::new(vec![Alias::new("bff", "best friend")]);
    let query = parse_command("post bff", "post", &table).unwrap();
    assert_eq!(query.tokens(), ["best", "friend"]);
}

#[test]
fn test_extend_keeps_first_declaration() {
    let mut table = AliasTable::new(vec![Alias::new("pup", "dog")]);
    table.extend(vec![Alias::new("pup", "puppy"), Alias::new("kit", "cat")]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.entries()[0].replacement, "dog");
    assert_eq!(table.entries()[1].alias, "kit");
}

#[test]
fn test_parser_normalizes_configured_keyword() {
    let parser = QueryParser::new("Post", Arc::new(synonym_table()));
    assert_eq!(parser.keyword(), "post");
    let query = parser.parse("POST pup").unwrap();
    assert_eq!(query.as_str(), "dog");
}
