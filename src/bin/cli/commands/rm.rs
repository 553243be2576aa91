use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, session: &str, word: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.find_entry(session, word)?;
    let removed = app
        .storage
        .delete_word(session, entry.id)
        .context("Failed to remove word")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "session": session.trim(),
                "removed": removed.word,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Removed '{}' from '{}'", removed.word, session.trim());
        }
    }

    Ok(())
}
