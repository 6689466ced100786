use crate::ctx::request::QueryValue;
use crate::ctx::request::normalization::parse_query;
use pretty_assertions::assert_eq;

#[test]
fn absent_query_is_empty() {
    assert!(parse_query(None).is_empty());
}

#[test]
fn empty_query_is_empty() {
    assert!(parse_query(Some("")).is_empty());
}

#[test]
fn single_pair() {
    let query = parse_query(Some("a=1"));

    assert_eq!(query.get("a"), Some(&QueryValue::Single("1".to_string())));
}

#[test]
fn repeated_keys_collect_all_values() {
    // Arrange
    let raw = "a=1&a=2&b=3";

    // Act
    let query = parse_query(Some(raw));

    // Assert
    assert_eq!(
        query.get("a"),
        Some(&QueryValue::Multiple(vec!["1".to_string(), "2".to_string()]))
    );
    assert_eq!(query.get("b"), Some(&QueryValue::Single("3".to_string())));
    assert_eq!(query.len(), 2);
}

#[test]
fn repeated_keys_keep_arrival_order() {
    let query = parse_query(Some("tag=z&tag=a&tag=m"));

    assert_eq!(query.get("tag").unwrap().all(), vec!["z", "a", "m"]);
    assert_eq!(query.first("tag"), Some("z"));
}

#[test]
fn key_without_value_maps_to_empty_string() {
    let query = parse_query(Some("flag"));

    assert_eq!(query.first("flag"), Some(""));
}

#[test]
fn form_encoding_is_decoded() {
    let query = parse_query(Some("q=hello+world&name=J%C3%BCrgen"));

    assert_eq!(query.first("q"), Some("hello world"));
    assert_eq!(query.first("name"), Some("Jürgen"));
}

#[test]
fn serializes_single_as_string_and_repeated_as_array() {
    let query = parse_query(Some("a=1&a=2&b=3"));

    let json = serde_json::to_value(&query).unwrap();

    assert_eq!(json, serde_json::json!({ "a": ["1", "2"], "b": "3" }));
}
