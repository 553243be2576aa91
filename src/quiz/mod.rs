//! Two-phase vocabulary quiz
//!
//! This module provides:
//! - The round state machine (setup, running, ended)
//! - Answer matching in both quiz directions
//! - Wrong-answer queueing and retry/restart follow-ups

pub mod engine;
pub mod models;

pub use engine::{QuizError, QuizRound};
pub use models::{
    AnswerOutcome, CheckState, QuizDirection, QuizItem, QuizPhase, RoundStart, RoundSummary,
};
