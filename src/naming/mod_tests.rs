use super::*;

#[test]
fn words_splits_camel_case_into_lowercase() {
    assert_eq!(words("removesItem"), vec!["removes", "item"]);
}

#[test]
fn words_splits_on_underscores_and_symbols() {
    assert_eq!(words("creates_new$entry"), vec!["creates", "new", "entry"]);
}

#[test]
fn words_keeps_digits_with_preceding_word() {
    assert_eq!(words("removes1Item2"), vec!["removes1", "item2"]);
}

#[test]
fn words_splits_acronym_before_next_word() {
    assert_eq!(words("parseXMLFile"), vec!["parse", "xml", "file"]);
}

#[test]
fn words_keeps_trailing_acronym_together() {
    assert_eq!(words("readsJSON"), vec!["reads", "json"]);
}

#[test]
fn words_returns_empty_for_empty_input() {
    assert!(words("").is_empty());
}

#[test]
fn words_returns_empty_for_symbols_only() {
    assert!(words("_&...").is_empty());
}

#[test]
fn present_tense_accepts_leading_verb_with_s() {
    assert!(is_present_tense("removesItem"));
}

#[test]
fn present_tense_accepts_single_verb() {
    assert!(is_present_tense("removes"));
}

#[test]
fn present_tense_rejects_base_form() {
    assert!(!is_present_tense("removeItem"));
    assert!(!is_present_tense("remove"));
}

#[test]
fn present_tense_rejects_empty_name() {
    assert!(!is_present_tense(""));
}

#[test]
fn present_tense_rejects_leading_uppercase() {
    assert!(!is_present_tense("Removes"));
}

#[test]
fn present_tense_rejects_non_letters() {
    assert!(!is_present_tense("___"));
    assert!(!is_present_tense("..."));
}

#[test]
fn present_tense_treats_digits_as_transparent() {
    assert!(is_present_tense("removes1"));
    assert!(is_present_tense("does1"));
    assert!(is_present_tense("removes12Item"));
    assert!(!is_present_tense("Does1"));
}

#[test]
fn camel_case_accepts_two_words() {
    assert!(is_camel_case("removesItem"));
}

#[test]
fn camel_case_rejects_single_word() {
    assert!(!is_camel_case("removes"));
}

#[test]
fn camel_case_rejects_snake_case_and_digits() {
    assert!(!is_camel_case("removes_item"));
    assert!(!is_camel_case("removes1Item"));
}

#[test]
fn camel_case_rejects_empty_and_upper_camel() {
    assert!(!is_camel_case(""));
    assert!(!is_camel_case("RemovesItem"));
}
