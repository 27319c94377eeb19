use super::*;

fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn tiny_model() -> LexiconTagger {
    let model = "#!testcop-pos 1\n\
                 # comment\n\
                 they PRP\n\
                 build VB NN\n\
                 model NN VB\n\
                 ~ing VBG NN\n\
                 ~s NNS VBZ\n";
    LexiconTagger::from_bytes(model.as_bytes()).unwrap()
}

#[test]
fn from_bytes_loads_lexicon_entries() {
    let tagger = tiny_model();
    assert_eq!(tagger.len(), 3);
    assert!(!tagger.is_empty());
}

#[test]
fn from_bytes_rejects_missing_header() {
    let result = LexiconTagger::from_bytes(b"they PRP\n");
    assert!(matches!(result, Err(TestcopError::ModelUnavailable(_))));
}

#[test]
fn from_bytes_rejects_entry_without_tags() {
    let result = LexiconTagger::from_bytes(b"#!testcop-pos 1\nthey\n");
    assert!(matches!(result, Err(TestcopError::ModelUnavailable(_))));
}

#[test]
fn from_bytes_rejects_invalid_utf8() {
    let result = LexiconTagger::from_bytes(&[0xff, 0xfe, 0x00]);
    assert!(result.is_err());
}

#[test]
fn tag_output_has_same_length_as_input() {
    let tagger = tiny_model();
    let input = tokens(&["they", "build", "model", "xyz"]);
    assert_eq!(tagger.tag(&input).len(), input.len());
}

#[test]
fn tag_picks_plural_verb_after_pronoun() {
    let tagger = tiny_model();
    let tags = tagger.tag(&tokens(&["they", "build", "model"]));
    assert_eq!(tags, vec![Tag::Prp, Tag::Vbp, Tag::Nn]);
}

#[test]
fn tag_uses_suffix_fallback_for_unknown_words() {
    let tagger = tiny_model();
    let tags = tagger.tag(&tokens(&["parsing", "robots"]));
    assert_eq!(tags, vec![Tag::Vbg, Tag::Nns]);
}

#[test]
fn tag_defaults_to_noun_without_any_match() {
    let tagger = tiny_model();
    assert_eq!(tagger.tag(&tokens(&["zq"])), vec![Tag::Nn]);
}

#[test]
fn tag_marks_numbers_as_cardinal() {
    let tagger = tiny_model();
    assert_eq!(tagger.tag(&tokens(&["42"])), vec![Tag::Cd]);
}

#[test]
fn unknown_labels_map_to_unknown_tag() {
    let tagger = LexiconTagger::from_bytes(b"#!testcop-pos 1\nfoo XYZ\n").unwrap();
    assert_eq!(tagger.tag(&tokens(&["foo"])), vec![Tag::Unknown]);
}

#[test]
fn shared_tagger_delegates_to_inner_tagger() {
    let shared = SharedTagger::new(tiny_model());
    let clone = shared.clone();
    assert_eq!(
        clone.tag(&tokens(&["they", "build"])),
        vec![Tag::Prp, Tag::Vbp]
    );
}

#[test]
fn tag_verb_set_matches_penn_verbs() {
    let verbs: Vec<Tag> = [
        Tag::Vb,
        Tag::Vbp,
        Tag::Vbz,
        Tag::Vbd,
        Tag::Vbg,
        Tag::Vbn,
        Tag::Vv,
        Tag::Vhp,
        Tag::Nns,
    ]
    .into_iter()
    .filter(|t| t.is_verb())
    .collect();
    assert_eq!(verbs.len(), 6);
}

#[test]
fn tag_labels_round_trip_for_spec_set() {
    for label in ["PRP", "PRP$", "NN", "NNS", "VBP", "VHP", "VV", "UNKNOWN"] {
        assert_eq!(Tag::from_label(label).label(), label);
    }
}
