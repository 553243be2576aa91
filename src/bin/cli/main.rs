mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "voca", about = "Personal vocabulary study CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List sessions with their word counts
    List,

    /// Create a new session
    New {
        /// Session name
        session: String,
    },

    /// Add a word to a session (creates the session if needed)
    Add {
        /// Session name
        session: String,
        /// English word
        word: String,
        /// Slash-separated Korean meanings, e.g. "사과/과일"
        #[arg(long)]
        meaning: Option<String>,
        /// Also ask the configured AI endpoint for meanings
        #[arg(long)]
        ai: bool,
    },

    /// List the words of a session
    Ls {
        /// Session name
        session: String,
    },

    /// Replace the meanings of a word
    Edit {
        /// Session name
        session: String,
        /// The word to edit
        word: String,
        /// New slash-separated meanings
        meanings: String,
    },

    /// Remove a word from a session
    Rm {
        /// Session name
        session: String,
        /// The word to remove
        word: String,
    },

    /// Remove duplicate words from a session
    Dedup {
        /// Session name
        session: String,
    },

    /// Run an interactive quiz over a session
    Quiz {
        /// Session name
        session: String,
        /// Quiz direction
        #[arg(long, default_value = "en-ko")]
        direction: Direction,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Direction {
    /// Show the word, answer with a meaning
    EnKo,
    /// Show the meanings, answer with the word
    KoEn,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::List => {
            commands::list::run(&app, &cli.format)?;
        }
        Command::New { session } => {
            commands::new::run(&mut app, &session, &cli.format)?;
        }
        Command::Add {
            session,
            word,
            meaning,
            ai,
        } => {
            commands::add::run(&mut app, &session, &word, meaning.as_deref(), ai, &cli.format)?;
        }
        Command::Ls { session } => {
            commands::ls::run(&app, &session, &cli.format)?;
        }
        Command::Edit {
            session,
            word,
            meanings,
        } => {
            commands::edit::run(&mut app, &session, &word, &meanings, &cli.format)?;
        }
        Command::Rm { session, word } => {
            commands::rm::run(&mut app, &session, &word, &cli.format)?;
        }
        Command::Dedup { session } => {
            commands::dedup::run(&mut app, &session, &cli.format)?;
        }
        Command::Quiz { session, direction } => {
            commands::quiz::run(&mut app, &session, direction)?;
        }
    }

    Ok(())
}
