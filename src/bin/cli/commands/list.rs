use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let sessions = app.storage.sessions();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = sessions
                .iter()
                .map(|session| {
                    serde_json::json!({
                        "name": session.name,
                        "wordCount": session.words.len(),
                        "createdAt": session.created_at.to_rfc3339(),
                        "updatedAt": session.updated_at.to_rfc3339(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if sessions.is_empty() {
                println!("No sessions yet. Create one with: voca new <session>");
                return Ok(());
            }

            let name_width = sessions
                .iter()
                .map(|s| s.name.len())
                .max()
                .unwrap_or(7)
                .max(7);

            println!(
                "{:<nw$} {:>5} {}",
                "Session",
                "Words",
                "Updated",
                nw = name_width
            );
            println!(
                "{} {} {}",
                "\u{2500}".repeat(name_width),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(10)
            );

            for session in sessions {
                println!(
                    "{:<nw$} {:>5} {}",
                    session.name,
                    session.words.len(),
                    session.updated_at.format("%Y-%m-%d"),
                    nw = name_width
                );
            }

            println!("\n{} sessions total", sessions.len());
        }
    }

    Ok(())
}
