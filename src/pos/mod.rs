//! Part-of-speech tagging for the present-simple classifier.
//!
//! The model is resolved lazily: nothing is read or downloaded until a rule
//! first asks for the classifier, and the outcome (tagger or failure reason)
//! is memoized for the rest of the invocation.

mod classifier;
mod source;
mod tag;
mod tagger;

pub use classifier::{PresentSimpleClassifier, plural_subject_present};
pub use source::{
    BundledSource, CachedSource, HttpClient, InternetSource, ModelSource, ReqwestClient,
    is_remote_url,
};
pub use tag::Tag;
pub use tagger::{LexiconTagger, MODEL_HEADER, PosTagger, SharedTagger};

use std::sync::OnceLock;

use tracing::{info, warn};

/// Lazily loaded POS model shared by every rule of one invocation.
pub struct PosModel {
    source: Option<Box<dyn ModelSource>>,
    loaded: OnceLock<Result<SharedTagger, String>>,
}

impl PosModel {
    #[must_use]
    pub fn new(source: impl ModelSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            loaded: OnceLock::new(),
        }
    }

    /// Model around an already constructed tagger.
    #[must_use]
    pub fn preloaded(tagger: SharedTagger) -> Self {
        Self {
            source: None,
            loaded: OnceLock::from(Ok(tagger)),
        }
    }

    /// Model that always reports itself unavailable.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            source: None,
            loaded: OnceLock::from(Err(reason.into())),
        }
    }

    /// The tagger, loading it on first call.
    ///
    /// # Errors
    /// Returns the reason the model could not be loaded.
    pub fn tagger(&self) -> Result<&SharedTagger, &str> {
        self.loaded
            .get_or_init(|| self.load())
            .as_ref()
            .map_err(String::as_str)
    }

    /// Present-simple classifier over this model.
    ///
    /// # Errors
    /// Returns the reason the model could not be loaded.
    pub fn classifier(&self) -> Result<PresentSimpleClassifier, &str> {
        self.tagger()
            .map(|tagger| PresentSimpleClassifier::new(tagger.clone()))
    }

    fn load(&self) -> Result<SharedTagger, String> {
        let Some(source) = &self.source else {
            return Err("no model source configured".to_string());
        };
        let bytes = source.bytes().map_err(|e| {
            warn!(source = %source.describe(), error = %e, "POS model unavailable");
            e.to_string()
        })?;
        let tagger = LexiconTagger::from_bytes(&bytes).map_err(|e| e.to_string())?;
        info!(source = %source.describe(), words = tagger.len(), "loaded POS model");
        Ok(SharedTagger::new(tagger))
    }
}

impl std::fmt::Debug for PosModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosModel")
            .field("source", &self.source.as_ref().map(|s| s.describe()))
            .field("loaded", &self.loaded.get().map(Result::is_ok))
            .finish()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
