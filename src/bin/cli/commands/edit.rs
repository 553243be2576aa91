use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    session: &str,
    word: &str,
    meanings: &str,
    format: &OutputFormat,
) -> Result<()> {
    let entry = app.find_entry(session, word)?;
    let changed = app
        .storage
        .edit_meanings(session, entry.id, meanings)
        .context("Failed to edit word")?;
    let entry = app.find_entry(session, word)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word": entry.word,
                "meanings": entry.meanings,
                "changed": changed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if changed {
                println!("Updated '{}': {}", entry.word, entry.joined_meanings());
            } else {
                println!(
                    "No change to '{}': {}",
                    entry.word,
                    entry.joined_meanings()
                );
            }
        }
    }

    Ok(())
}
