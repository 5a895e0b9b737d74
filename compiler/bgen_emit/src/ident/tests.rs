use super::*;

#[test]
fn snake_case_splits_on_case_boundaries() {
    assert_eq!(to_snake_case("MinimumPrice"), "minimum_price");
    assert_eq!(to_snake_case("Id"), "id");
    assert_eq!(to_snake_case("URLPath"), "url_path");
    assert_eq!(to_snake_case("Entity2List"), "entity2_list");
    assert_eq!(to_snake_case("HTTP"), "http");
}

#[test]
fn snake_case_keeps_existing_snake_case() {
    assert_eq!(to_snake_case("minimum_price"), "minimum_price");
    assert_eq!(to_snake_case("Minimum_Price"), "minimum_price");
    assert_eq!(to_snake_case("tags"), "tags");
}

#[test]
fn keywords_are_escaped() {
    assert_eq!(escape("type").as_deref(), Some("r#type"));
    assert_eq!(escape("match").as_deref(), Some("r#match"));
    assert_eq!(escape("name").as_deref(), Some("name"));
}

#[test]
fn unusable_words_are_rejected() {
    assert_eq!(escape(""), None);
    assert_eq!(escape("_"), None);
    assert_eq!(escape("self"), None);
    assert_eq!(escape("Self"), None);
    assert_eq!(escape("crate"), None);
    assert_eq!(escape("2fast"), None);
    assert_eq!(escape("has space"), None);
    assert_eq!(escape("dash-ed"), None);
}

#[test]
fn identifier_check_accepts_underscore_prefix() {
    assert!(is_identifier("_private"));
    assert!(is_identifier("PriceRange"));
    assert!(!is_identifier("Price Range"));
    assert!(!is_keyword("PriceRange"));
}

#[test]
fn identifier_check_is_ascii_only() {
    assert!(is_identifier("x2"));
    assert!(is_identifier("Size_2"));
    assert!(!is_identifier("x²"));
    assert!(!is_identifier("Größe"));
    assert!(!is_identifier("名前"));
    assert!(!is_identifier("2x"));
    assert_eq!(escape("x²"), None);
}
