//! Value types for quiz rounds
//!
//! Rounds are ephemeral and never persisted, so nothing here derives
//! serde. The store only sees the per-answer outcomes the caller
//! forwards to it.

use uuid::Uuid;

use crate::vocabulary::WordEntry;

/// Which way a round asks its questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizDirection {
    /// Show the English word, expect one of its Korean meanings
    WordToMeaning,
    /// Show the Korean meanings, expect the English word
    MeaningToWord,
}

/// Lifecycle phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Direction not chosen yet
    Setup,
    /// Walking the items
    Running,
    /// All items answered; summary and follow-ups available
    Ended,
}

/// Two-phase answer protocol inside `Running`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Waiting for the user's answer to the current item
    AwaitingAnswer,
    /// Verdict shown, waiting for the user to move on
    AwaitingAdvance,
}

/// Immutable snapshot of one entry, taken when the round is created
#[derive(Debug, Clone, PartialEq)]
pub struct QuizItem {
    pub entry_id: Uuid,
    pub word: String,
    pub meanings: Vec<String>,
    pub wrong_count: u32,
}

impl QuizItem {
    pub fn from_entry(entry: &WordEntry) -> Self {
        Self {
            entry_id: entry.id,
            word: entry.word.clone(),
            meanings: entry.meanings.clone(),
            wrong_count: entry.wrong_count,
        }
    }
}

/// Verdict for one submitted answer
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    /// Entry to forward to `VocabularyStorage::record_answer`
    pub entry_id: Uuid,
    pub correct: bool,
    /// The answers that would have been accepted, for display
    pub accepted_answers: Vec<String>,
}

/// How a start or retry request resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStart {
    /// The round is running with this many items
    Started { total: usize },
    /// There was nothing to quiz; the phase did not change
    Empty,
}

/// End-of-round statistics
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub total: usize,
    pub correct: u32,
    pub accuracy_percent: f32,
}
