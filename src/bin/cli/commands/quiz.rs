use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use voca::quiz::{QuizDirection, QuizPhase, QuizRound, RoundStart};

use crate::app::App;
use crate::Direction;

pub fn run(app: &mut App, session: &str, direction: Direction) -> Result<()> {
    let session_name = session.trim().to_string();
    let entries = app
        .storage
        .entries(&session_name)
        .context("Failed to load session")?
        .to_vec();

    let mut round = QuizRound::new(&entries);
    let mut direction = match direction {
        Direction::EnKo => QuizDirection::WordToMeaning,
        Direction::KoEn => QuizDirection::MeaningToWord,
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match round.phase() {
            QuizPhase::Setup => match round.start(direction)? {
                RoundStart::Empty => {
                    println!("Nothing to quiz in '{}'.", session_name);
                    return Ok(());
                }
                RoundStart::Started { total } => {
                    println!("Quizzing {} words from '{}'.", total, session_name);
                }
            },
            QuizPhase::Running => {
                let (position, total) = round.progress();
                let question = {
                    let item = round.current_item().context("No current item")?;
                    match round.direction() {
                        QuizDirection::WordToMeaning => item.word.clone(),
                        QuizDirection::MeaningToWord => item.meanings.join("/"),
                    }
                };
                print!("[{}/{}] {} > ", position, total, question);
                io::stdout().flush()?;
                let Some(answer) = next_line(&mut lines)? else {
                    println!();
                    return Ok(());
                };

                let outcome = round.submit_answer(&answer)?;
                app.storage
                    .record_answer(&session_name, outcome.entry_id, outcome.correct)
                    .context("Failed to record answer")?;

                if outcome.correct {
                    println!("  Correct");
                } else {
                    println!(
                        "  Wrong. Accepted: {}",
                        outcome.accepted_answers.join("/")
                    );
                }

                print!("  Enter to continue > ");
                io::stdout().flush()?;
                if next_line(&mut lines)?.is_none() {
                    println!();
                    return Ok(());
                }
                round.advance()?;
            }
            QuizPhase::Ended => {
                let summary = round.end_summary()?;
                println!(
                    "\nRound done: {}/{} correct ({:.0}%)",
                    summary.correct, summary.total, summary.accuracy_percent
                );
                if round.wrong_queue_len() > 0 {
                    println!("{} words to retry.", round.wrong_queue_len());
                }

                while round.phase() == QuizPhase::Ended {
                    print!("[r]etry wrong / [s]tart over / [q]uit > ");
                    io::stdout().flush()?;
                    let Some(choice) = next_line(&mut lines)? else {
                        println!();
                        return Ok(());
                    };
                    match choice.trim() {
                        "r" => match round.retry_wrong_only()? {
                            RoundStart::Started { total } => {
                                println!("Retrying {} words.", total);
                            }
                            RoundStart::Empty => {
                                println!("Nothing to retry.");
                            }
                        },
                        "s" => {
                            round.restart_with_setup()?;
                            direction = ask_direction(&mut lines, direction)?;
                        }
                        "q" => return Ok(()),
                        _ => {}
                    }
                }
            }
        }
    }
}

/// Prompt for a quiz direction, keeping `current` on an empty answer
fn ask_direction(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    current: QuizDirection,
) -> Result<QuizDirection> {
    let current_label = match current {
        QuizDirection::WordToMeaning => "en-ko",
        QuizDirection::MeaningToWord => "ko-en",
    };
    loop {
        print!("Direction [en-ko/ko-en] (Enter keeps {}) > ", current_label);
        io::stdout().flush()?;
        let Some(choice) = next_line(lines)? else {
            return Ok(current);
        };
        match choice.trim() {
            "" => return Ok(current),
            "en-ko" => return Ok(QuizDirection::WordToMeaning),
            "ko-en" => return Ok(QuizDirection::MeaningToWord),
            other => println!("Unknown direction '{}'", other),
        }
    }
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
