use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, session: &str, format: &OutputFormat) -> Result<()> {
    let entries = app
        .storage
        .entries(session)
        .context("Failed to list words")?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "id": entry.id.to_string(),
                        "word": entry.word,
                        "meanings": entry.meanings,
                        "wrongCount": entry.wrong_count,
                        "correctCount": entry.correct_count,
                        "updatedAt": entry.updated_at.to_rfc3339(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No words in '{}'.", session.trim());
                return Ok(());
            }

            let word_width = entries
                .iter()
                .map(|e| e.word.len())
                .max()
                .unwrap_or(4)
                .min(24)
                .max(4);

            println!(
                "{:<ww$} {:>5} {:>7} {}",
                "Word",
                "Wrong",
                "Correct",
                "Meanings",
                ww = word_width
            );
            println!(
                "{} {} {} {}",
                "\u{2500}".repeat(word_width),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(7),
                "\u{2500}".repeat(10)
            );

            for entry in entries {
                let word = truncate_display(&entry.word, word_width);
                println!(
                    "{:<ww$} {:>5} {:>7} {}",
                    word,
                    entry.wrong_count,
                    entry.correct_count,
                    entry.joined_meanings(),
                    ww = word_width
                );
            }

            println!("\n{} words total", entries.len());
        }
    }

    Ok(())
}

/// Shorten a word to at most `width` bytes, cutting between characters
/// so multi-byte text never splits mid-character
fn truncate_display(word: &str, width: usize) -> String {
    if word.len() <= width {
        return word.to_string();
    }
    let budget = width.saturating_sub(3);
    let mut prefix = String::new();
    for ch in word.chars() {
        if prefix.len() + ch.len_utf8() > budget {
            break;
        }
        prefix.push(ch);
    }
    format!("{}...", prefix)
}
