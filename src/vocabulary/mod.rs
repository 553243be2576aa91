//! Vocabulary record store
//!
//! This module provides:
//! - Normalization rules for words and slash-separated meaning strings
//! - Session and word entry models
//! - Atomic JSON persistence with corrupt-file recovery
//! - Add/merge, edit, delete and dedup operations over sessions

pub mod models;
pub mod normalize;
pub mod storage;

pub use models::{Session, WordEntry};
pub use storage::{AddOutcome, StoreError, VocabularyStorage};
