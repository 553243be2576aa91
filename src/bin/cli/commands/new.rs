use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, session: &str, format: &OutputFormat) -> Result<()> {
    app.storage
        .create_session(session)
        .context("Failed to create session")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "created": session.trim(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Created session '{}'", session.trim());
        }
    }

    Ok(())
}
