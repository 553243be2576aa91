//! Personal vocabulary study tool
//!
//! Words live in named sessions, each carrying slash-separated Korean
//! meanings and cumulative quiz counters. The [`vocabulary`] module owns
//! normalization and atomic JSON persistence, [`quiz`] runs two-phase
//! drill rounds over a session snapshot, and [`suggest`] fills in
//! meanings from an OpenAI-compatible endpoint when asked.

pub mod config;
pub mod quiz;
pub mod suggest;
pub mod vocabulary;
