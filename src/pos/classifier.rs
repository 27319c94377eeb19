use super::{SharedTagger, Tag};
use crate::naming::{is_present_tense, words};

/// Pronoun put in front of a name before tagging.
///
/// It anchors the plural-subject pattern: `theyBuildModel` is tagged as
/// `i they build model`, giving `PRP PRP VBP NN`.
const SUBJECT_ANCHOR: &str = "i";

/// Present-simple classifier backed by a POS tagger.
#[derive(Debug, Clone)]
pub struct PresentSimpleClassifier {
    tagger: SharedTagger,
}

impl PresentSimpleClassifier {
    #[must_use]
    pub const fn new(tagger: SharedTagger) -> Self {
        Self { tagger }
    }

    /// Whether the identifier reads as a present-simple phrase.
    ///
    /// Accepts everything the deterministic check accepts, plus names that
    /// start with a plural subject followed by a base-form verb.
    #[must_use]
    pub fn is_present_simple(&self, name: &str) -> bool {
        if is_present_tense(name) {
            return true;
        }
        let mut tokens = vec![SUBJECT_ANCHOR.to_string()];
        tokens.extend(words(name));
        plural_subject_present(&self.tagger.tag(&tokens))
    }
}

/// Plural-subject present check over a tag sequence.
///
/// Keeps only `PRP`, `VB`, `VBP` and `NNS`; needs at least three of them, at
/// least one verb-or-plural-noun among them, and the first two kept tags must
/// be `(PRP, PRP)`, `(PRP, NNS)` or `(_, NNS)`.
#[must_use]
pub fn plural_subject_present(tags: &[Tag]) -> bool {
    let kept: Vec<Tag> = tags
        .iter()
        .copied()
        .filter(|tag| matches!(tag, Tag::Prp | Tag::Vb | Tag::Vbp | Tag::Nns))
        .collect();
    if kept.len() < 3 {
        return false;
    }
    let has_predicate = kept.iter().any(|tag| tag.is_verb() || *tag == Tag::Nns);
    let subject_first = matches!(
        (kept[0], kept[1]),
        (Tag::Prp, Tag::Prp | Tag::Nns) | (_, Tag::Nns)
    );
    has_predicate && subject_first
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
