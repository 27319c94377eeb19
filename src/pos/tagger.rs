use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::Tag;
use crate::error::{Result, TestcopError};

/// First line every model blob has to start with.
pub const MODEL_HEADER: &str = "#!testcop-pos 1";

/// A part-of-speech tagger producing one tag per token.
pub trait PosTagger {
    /// Tag lowercase tokens. The output has the same length as the input.
    fn tag(&self, tokens: &[String]) -> Vec<Tag>;
}

/// Lexicon-driven tagger loaded from a model blob.
///
/// The model is UTF-8 text: a header line, then one `word TAG [TAG...]` entry
/// per line with candidate tags in preference order, and `~suffix TAG...`
/// entries used for words missing from the lexicon. Lines starting with `#`
/// are comments.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    lexicon: HashMap<String, Vec<Tag>>,
    /// Sorted longest suffix first.
    suffixes: Vec<(String, Vec<Tag>)>,
}

impl LexiconTagger {
    /// Build a tagger from raw model bytes.
    ///
    /// # Errors
    /// Returns [`TestcopError::ModelUnavailable`] if the bytes are not UTF-8,
    /// the header is missing, or an entry has no tags.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| TestcopError::ModelUnavailable(format!("model is not UTF-8: {e}")))?;
        let mut lines = text.lines();
        if lines.next().map(str::trim) != Some(MODEL_HEADER) {
            return Err(TestcopError::ModelUnavailable(
                "model header is missing".to_string(),
            ));
        }

        let mut tagger = Self::default();
        for (idx, line) in lines.enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(key) = parts.next() else {
                continue;
            };
            let tags: Vec<Tag> = parts.map(Tag::from_label).collect();
            if tags.is_empty() {
                return Err(TestcopError::ModelUnavailable(format!(
                    "model entry on line {} has no tags",
                    idx + 2
                )));
            }
            if let Some(suffix) = key.strip_prefix('~') {
                tagger.suffixes.push((suffix.to_string(), tags));
            } else {
                tagger.lexicon.insert(key.to_lowercase(), tags);
            }
        }
        tagger
            .suffixes
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Ok(tagger)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn candidates(&self, token: &str) -> Vec<Tag> {
        if token.chars().all(|c| c.is_ascii_digit()) && !token.is_empty() {
            return vec![Tag::Cd];
        }
        if let Some(tags) = self.lexicon.get(token) {
            return tags.clone();
        }
        self.suffixes
            .iter()
            .find(|(suffix, _)| token.len() > suffix.len() && token.ends_with(suffix.as_str()))
            .map_or_else(|| vec![Tag::Nn], |(_, tags)| tags.clone())
    }
}

/// Pick one tag out of the candidates given the previously chosen tag.
fn disambiguate(candidates: &[Tag], prev: Option<Tag>) -> Tag {
    let first = candidates.first().copied().unwrap_or(Tag::Unknown);
    if candidates.len() < 2 {
        return first;
    }
    let has = |tag: Tag| candidates.contains(&tag);
    match prev {
        // A verb right after a plural subject is in its non-3rd-person form.
        Some(Tag::Prp | Tag::Nns | Tag::Nnps)
            if first != Tag::Nns && (has(Tag::Vbp) || has(Tag::Vb)) =>
        {
            Tag::Vbp
        }
        Some(Tag::Nn | Tag::Nnp) if has(Tag::Vbz) => Tag::Vbz,
        Some(Tag::Md | Tag::To) if has(Tag::Vb) => Tag::Vb,
        Some(
            Tag::Dt
            | Tag::Jj
            | Tag::PrpPossessive
            | Tag::In
            | Tag::Vb
            | Tag::Vbp
            | Tag::Vbz
            | Tag::Vbd
            | Tag::Vbg,
        ) => candidates
            .iter()
            .copied()
            .find(|tag| matches!(tag, Tag::Nn | Tag::Nns))
            .unwrap_or(first),
        _ => first,
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Vec<Tag> {
        let mut tags: Vec<Tag> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let candidates = self.candidates(token);
            tags.push(disambiguate(&candidates, tags.last().copied()));
        }
        tags
    }
}

/// Process-wide tagger handle that serializes calls.
///
/// The tagger runtime makes no re-entrancy promise, so every call goes
/// through one mutex. Clones share the same tagger.
#[derive(Clone)]
pub struct SharedTagger {
    inner: Arc<Mutex<Box<dyn PosTagger + Send>>>,
}

impl SharedTagger {
    #[must_use]
    pub fn new(tagger: impl PosTagger + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(tagger))),
        }
    }

    #[must_use]
    pub fn tag(&self, tokens: &[String]) -> Vec<Tag> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.tag(tokens)
    }
}

impl std::fmt::Debug for SharedTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTagger").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tagger_tests.rs"]
mod tests;
