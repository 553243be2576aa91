use anyhow::{Context, Result};

use voca::vocabulary::WordEntry;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    session: &str,
    word: &str,
    meaning: Option<&str>,
    ai: bool,
    format: &OutputFormat,
) -> Result<()> {
    let user_raw = meaning.unwrap_or_default();
    let ai_raw = if ai {
        app.suggest_meanings(word)
    } else {
        String::new()
    };

    let outcome = app
        .storage
        .add_or_merge(session, word, user_raw, &ai_raw)
        .context("Failed to add word")?;

    if let Some(warning) = no_meanings_warning(&outcome.entry) {
        eprintln!("{}", warning);
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "session": session.trim(),
                "word": outcome.entry.word,
                "meanings": outcome.entry.meanings,
                "merged": outcome.merged,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let verb = if outcome.merged { "Merged" } else { "Added" };
            println!(
                "{} '{}' in '{}': {}",
                verb,
                outcome.entry.word,
                session.trim(),
                outcome.entry.joined_meanings()
            );
        }
    }

    Ok(())
}

/// Warning for an entry left without meanings, printed to stderr in
/// every output format
fn no_meanings_warning(entry: &WordEntry) -> Option<String> {
    if entry.meanings.is_empty() {
        Some(format!(
            "Warning: '{}' has no meanings yet. Add some with: voca edit",
            entry.word
        ))
    } else {
        None
    }
}
