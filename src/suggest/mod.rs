//! Meaning suggestion for new words
//!
//! The store never talks to the network itself. Callers that want an AI
//! suggestion ask a [`MeaningSuggester`] for a raw slash-separated
//! candidate string and pass it into `add_or_merge` alongside the
//! user-typed meanings. [`suggest_or_empty`] absorbs every failure into
//! an empty string, so a dead network or a missing API key degrades an
//! add instead of blocking it.

pub mod mock;
pub mod openai;

use thiserror::Error;

pub use mock::MockSuggester;
pub use openai::OpenAiSuggester;

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),
}

/// Source of meaning suggestions for a word
pub trait MeaningSuggester {
    /// Suggest Korean meanings for `word` as a raw slash-separated string
    fn suggest(&self, word: &str) -> Result<String, SuggestError>;
}

/// Ask `suggester` for meanings, absorbing every failure into ""
pub fn suggest_or_empty(suggester: &dyn MeaningSuggester, word: &str) -> String {
    match suggester.suggest(word) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("Meaning suggestion failed for '{}': {}", word, err);
            String::new()
        }
    }
}
