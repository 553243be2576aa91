//! Quiz round state machine
//!
//! A round snapshots the entries it quizzes, orders them hardest first
//! (highest wrong count), and walks them with a two-phase protocol:
//! submit an answer, see the verdict, then advance. Wrong answers queue
//! their item for an optional follow-up round over just the misses.
//!
//! The round never writes to the store. Callers forward each
//! [`AnswerOutcome`] to `VocabularyStorage::record_answer` so the
//! cumulative counters survive the round.

use thiserror::Error;

use super::models::{
    AnswerOutcome, CheckState, QuizDirection, QuizItem, QuizPhase, RoundStart, RoundSummary,
};
use crate::vocabulary::normalize::lookup_key;
use crate::vocabulary::WordEntry;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("{operation} is not valid in {phase:?}/{check_state:?}")]
    InvalidState {
        operation: &'static str,
        phase: QuizPhase,
        check_state: CheckState,
    },
}

pub type Result<T> = std::result::Result<T, QuizError>;

/// One quiz round over a snapshot of session entries
pub struct QuizRound {
    items: Vec<QuizItem>,
    /// Snapshot order at creation, for restart
    initial_items: Vec<QuizItem>,
    wrong_queue: Vec<QuizItem>,
    cursor: usize,
    correct_count: u32,
    direction: QuizDirection,
    phase: QuizPhase,
    check_state: CheckState,
    last_outcome: Option<AnswerOutcome>,
}

impl QuizRound {
    /// Snapshot `entries` into a new round, hardest words first
    ///
    /// The sort is stable: entries with equal wrong counts keep their
    /// store order.
    pub fn new(entries: &[WordEntry]) -> Self {
        let mut items: Vec<QuizItem> = entries.iter().map(QuizItem::from_entry).collect();
        items.sort_by(|a, b| b.wrong_count.cmp(&a.wrong_count));
        Self {
            initial_items: items.clone(),
            items,
            wrong_queue: Vec::new(),
            cursor: 0,
            correct_count: 0,
            direction: QuizDirection::WordToMeaning,
            phase: QuizPhase::Setup,
            check_state: CheckState::AwaitingAnswer,
            last_outcome: None,
        }
    }

    /// Leave setup and begin asking questions
    ///
    /// A round with no items reports `Empty` and stays in setup.
    pub fn start(&mut self, direction: QuizDirection) -> Result<RoundStart> {
        if self.phase != QuizPhase::Setup {
            return Err(self.invalid("start"));
        }
        self.direction = direction;
        self.wrong_queue.clear();
        self.cursor = 0;
        self.correct_count = 0;
        self.last_outcome = None;
        if self.items.is_empty() {
            return Ok(RoundStart::Empty);
        }
        self.phase = QuizPhase::Running;
        self.check_state = CheckState::AwaitingAnswer;
        Ok(RoundStart::Started {
            total: self.items.len(),
        })
    }

    /// Check `answer` against the current item
    ///
    /// Word-to-meaning accepts any single stored meaning, compared
    /// case-sensitively after trimming. Meaning-to-word accepts the word
    /// under its lookup key. Submitting twice without advancing is
    /// rejected.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome> {
        if self.phase != QuizPhase::Running || self.check_state != CheckState::AwaitingAnswer {
            return Err(self.invalid("submit_answer"));
        }
        let item = &self.items[self.cursor];
        let (correct, accepted_answers) = match self.direction {
            QuizDirection::WordToMeaning => {
                let given = answer.trim();
                (
                    item.meanings.iter().any(|m| m == given),
                    item.meanings.clone(),
                )
            }
            QuizDirection::MeaningToWord => (
                lookup_key(answer) == lookup_key(&item.word),
                vec![item.word.clone()],
            ),
        };

        if correct {
            self.correct_count += 1;
        } else if !self
            .wrong_queue
            .iter()
            .any(|queued| queued.entry_id == item.entry_id)
        {
            self.wrong_queue.push(item.clone());
        }

        let outcome = AnswerOutcome {
            entry_id: item.entry_id,
            correct,
            accepted_answers,
        };
        self.last_outcome = Some(outcome.clone());
        self.check_state = CheckState::AwaitingAdvance;
        Ok(outcome)
    }

    /// Move past the current item after its verdict was shown
    pub fn advance(&mut self) -> Result<()> {
        if self.phase != QuizPhase::Running || self.check_state != CheckState::AwaitingAdvance {
            return Err(self.invalid("advance"));
        }
        self.last_outcome = None;
        if self.cursor + 1 >= self.items.len() {
            self.phase = QuizPhase::Ended;
        } else {
            self.cursor += 1;
            self.check_state = CheckState::AwaitingAnswer;
        }
        Ok(())
    }

    /// Statistics for a finished round
    pub fn end_summary(&self) -> Result<RoundSummary> {
        if self.phase != QuizPhase::Ended {
            return Err(self.invalid("end_summary"));
        }
        let total = self.items.len();
        let accuracy_percent = if total == 0 {
            0.0
        } else {
            self.correct_count as f32 * 100.0 / total as f32
        };
        Ok(RoundSummary {
            total,
            correct: self.correct_count,
            accuracy_percent,
        })
    }

    /// Start a follow-up round over the items answered wrong
    ///
    /// An empty wrong queue reports `Empty` and the round stays ended.
    pub fn retry_wrong_only(&mut self) -> Result<RoundStart> {
        if self.phase != QuizPhase::Ended {
            return Err(self.invalid("retry_wrong_only"));
        }
        if self.wrong_queue.is_empty() {
            return Ok(RoundStart::Empty);
        }
        self.items = std::mem::take(&mut self.wrong_queue);
        self.cursor = 0;
        self.correct_count = 0;
        self.last_outcome = None;
        self.phase = QuizPhase::Running;
        self.check_state = CheckState::AwaitingAnswer;
        Ok(RoundStart::Started {
            total: self.items.len(),
        })
    }

    /// Go back to setup with the original item order
    ///
    /// The next `start` re-confirms the direction, as on a fresh round.
    pub fn restart_with_setup(&mut self) -> Result<()> {
        if self.phase != QuizPhase::Ended {
            return Err(self.invalid("restart_with_setup"));
        }
        self.items = self.initial_items.clone();
        self.wrong_queue.clear();
        self.cursor = 0;
        self.correct_count = 0;
        self.last_outcome = None;
        self.phase = QuizPhase::Setup;
        self.check_state = CheckState::AwaitingAnswer;
        Ok(())
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    /// The direction chosen at the last `start`
    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    /// The item currently being asked, while the round is running
    pub fn current_item(&self) -> Option<&QuizItem> {
        if self.phase == QuizPhase::Running {
            self.items.get(self.cursor)
        } else {
            None
        }
    }

    /// 1-based position and total, for progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor + 1, self.items.len())
    }

    /// Verdict of the last submit, cleared on advance
    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    /// Number of items queued for a retry round
    pub fn wrong_queue_len(&self) -> usize {
        self.wrong_queue.len()
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidState {
            operation,
            phase: self.phase,
            check_state: self.check_state,
        }
    }
}
