use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, session: &str, format: &OutputFormat) -> Result<()> {
    let removed = app
        .storage
        .deduplicate_session(session)
        .context("Failed to deduplicate session")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "session": session.trim(),
                "removed": removed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if removed == 0 {
                println!("No duplicates in '{}'.", session.trim());
            } else {
                println!(
                    "Removed {} duplicate {} from '{}'.",
                    removed,
                    if removed == 1 { "entry" } else { "entries" },
                    session.trim()
                );
            }
        }
    }

    Ok(())
}
