use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use voca::config::AppConfig;
use voca::suggest::{suggest_or_empty, OpenAiSuggester};
use voca::vocabulary::{VocabularyStorage, WordEntry};

/// Shared application state for CLI commands
pub struct App {
    pub storage: VocabularyStorage,
    pub config: AppConfig,
}

impl App {
    /// Initialize from a data directory flag, the `VOCA_DATA_DIR`
    /// environment variable, or the platform default
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match std::env::var_os("VOCA_DATA_DIR") {
                Some(dir) => PathBuf::from(dir),
                None => VocabularyStorage::default_data_dir()
                    .context("Failed to get data directory")?,
            },
        };

        let config = AppConfig::load(&data_dir).context("Failed to load config")?;
        let storage =
            VocabularyStorage::new(data_dir).context("Failed to open vocabulary store")?;

        if let Some(path) = storage.recovered_from() {
            eprintln!(
                "Warning: store file was corrupt and has been moved to {}",
                path.display()
            );
        }

        Ok(Self { storage, config })
    }

    /// Ask the configured suggester for meanings, absorbing failures
    ///
    /// Returns "" when suggestions are disabled, the API key is missing,
    /// or the request fails. An add never blocks on this.
    pub fn suggest_meanings(&self, word: &str) -> String {
        if !self.config.suggest.enabled {
            log::info!("Meaning suggestion is disabled in config");
            return String::new();
        }
        match OpenAiSuggester::from_config(&self.config.suggest) {
            Ok(suggester) => suggest_or_empty(&suggester, word),
            Err(err) => {
                log::warn!("Meaning suggestion unavailable: {}", err);
                String::new()
            }
        }
    }

    /// Find an entry by word text, with a helpful error
    pub fn find_entry(&self, session: &str, word: &str) -> Result<WordEntry> {
        let Some(session) = self.storage.session(session) else {
            bail!("No session named '{}'", session.trim());
        };
        match session.find_by_word(word) {
            Some(entry) => Ok(entry.clone()),
            None => bail!(
                "No word matching '{}' in session '{}'",
                word.trim(),
                session.name
            ),
        }
    }
}
