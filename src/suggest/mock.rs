//! Scriptable suggester for tests and offline use

use std::sync::atomic::{AtomicU32, Ordering};

use super::{MeaningSuggester, SuggestError};

/// Suggester that replies with a fixed string or a scripted failure
pub struct MockSuggester {
    reply: Option<String>,
    call_count: AtomicU32,
}

impl MockSuggester {
    /// Create a mock that always returns the same reply
    pub fn with_fixed_reply(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock whose every call fails
    pub fn failing() -> Self {
        Self {
            reply: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of calls made to this suggester
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl MeaningSuggester for MockSuggester {
    fn suggest(&self, _word: &str) -> Result<String, SuggestError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(SuggestError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            }),
        }
    }
}
