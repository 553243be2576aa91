//! Data models for the vocabulary store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize::{join_meanings, lookup_key};

/// A studied word with its meanings and cumulative quiz results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: Uuid,
    /// Surface form as the user first typed it (casing preserved)
    pub word: String,
    /// Clean meaning fragments, insertion order preserved
    #[serde(default)]
    pub meanings: Vec<String>,
    /// Times answered wrong across all quiz rounds
    #[serde(default)]
    pub wrong_count: u32,
    /// Times answered correctly across all quiz rounds
    #[serde(default)]
    pub correct_count: u32,
    pub created_at: DateTime<Utc>,
    /// Last change to the meanings, not the counters
    pub updated_at: DateTime<Utc>,
}

impl WordEntry {
    pub fn new(word: String, meanings: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            word,
            meanings,
            wrong_count: 0,
            correct_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The identity key this entry merges and matches under
    pub fn lookup_key(&self) -> String {
        lookup_key(&self.word)
    }

    /// Slash-joined display form of the meanings
    pub fn joined_meanings(&self) -> String {
        join_meanings(&self.meanings)
    }
}

/// A named group of words studied together
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub name: String,
    #[serde(default)]
    pub words: Vec<WordEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            name,
            words: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find an entry whose lookup key matches `word`
    pub fn find_by_word(&self, word: &str) -> Option<&WordEntry> {
        let key = lookup_key(word);
        self.words.iter().find(|entry| entry.lookup_key() == key)
    }
}
