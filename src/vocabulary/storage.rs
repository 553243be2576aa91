//! Storage operations for the vocabulary store
//!
//! The whole store lives in a single `voca.json` document under the data
//! directory. Every mutating operation rewrites the document atomically
//! (write to `voca.json.tmp`, then rename) before returning, so a crash
//! leaves either the previous or the next complete store on disk, never
//! a hybrid. A store file that fails to parse is moved aside to
//! `voca.json.broken` and the store continues empty.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Session, WordEntry};
use super::normalize::{join_meanings, lookup_key, normalize_meanings};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Word is empty")]
    EmptyWord,

    #[error("Session name is empty")]
    EmptySessionName,

    #[error("Session already exists: {0}")]
    SessionExists(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Word not found: {0}")]
    WordNotFound(Uuid),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Result of an add-or-merge operation
#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// The entry after the operation
    pub entry: WordEntry,
    /// True when an existing entry absorbed the meanings
    pub merged: bool,
}

/// Storage manager for the vocabulary store
///
/// Holds the sessions in memory and persists the full document after
/// each mutation. Single writer assumed; the last atomic rename wins.
pub struct VocabularyStorage {
    data_dir: PathBuf,
    sessions: Vec<Session>,
    /// Set when a corrupt store file was moved aside during load
    recovered_from: Option<PathBuf>,
}

impl VocabularyStorage {
    /// Open the store in `data_dir`, creating the directory if needed
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        let mut storage = Self {
            data_dir,
            sessions: Vec::new(),
            recovered_from: None,
        };
        storage.load()?;
        Ok(storage)
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("voca"))
            .ok_or(StoreError::DataDirNotFound)
    }

    /// Path of the store document
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("voca.json")
    }

    /// The sidecar a corrupt store file was moved to, if that happened
    pub fn recovered_from(&self) -> Option<&Path> {
        self.recovered_from.as_deref()
    }

    /// Load the store document, recovering from a corrupt file
    fn load(&mut self) -> Result<()> {
        let path = self.store_path();
        if !path.exists() {
            self.sessions = Vec::new();
            return Ok(());
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<Vec<Session>>(&content) {
            Ok(sessions) => {
                self.sessions = sessions;
            }
            Err(err) => {
                log::warn!(
                    "Store file {} is not valid JSON ({}), starting empty",
                    path.display(),
                    err
                );
                let broken = path.with_extension("json.broken");
                match fs::rename(&path, &broken) {
                    Ok(()) => self.recovered_from = Some(broken),
                    Err(rename_err) => {
                        log::warn!("Could not move corrupt store aside: {}", rename_err)
                    }
                }
                self.sessions = Vec::new();
            }
        }
        Ok(())
    }

    /// Save the whole store using atomic write (write to .tmp then rename)
    fn save(&self) -> Result<()> {
        let path = self.store_path();
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.sessions)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    // ==================== Session Operations ====================

    /// All sessions in insertion order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Look up a session by its trimmed name
    pub fn session(&self, name: &str) -> Option<&Session> {
        let name = name.trim();
        self.sessions.iter().find(|s| s.name == name)
    }

    /// The entries of a session in insertion order
    pub fn entries(&self, session: &str) -> Result<&[WordEntry]> {
        let idx = self.session_index(session)?;
        Ok(&self.sessions[idx].words)
    }

    /// Create a new empty session
    pub fn create_session(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptySessionName);
        }
        if self.sessions.iter().any(|s| s.name == name) {
            return Err(StoreError::SessionExists(name.to_string()));
        }
        self.sessions.push(Session::new(name.to_string()));
        self.save()?;
        Ok(())
    }

    fn session_index(&self, name: &str) -> Result<usize> {
        let name = name.trim();
        self.sessions
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| StoreError::SessionNotFound(name.to_string()))
    }

    /// Get the index of session `name`, creating it when absent
    ///
    /// Does not save by itself; callers persist after their mutation.
    fn ensure_session(&mut self, name: &str) -> Result<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptySessionName);
        }
        if let Some(idx) = self.sessions.iter().position(|s| s.name == name) {
            return Ok(idx);
        }
        self.sessions.push(Session::new(name.to_string()));
        Ok(self.sessions.len() - 1)
    }

    // ==================== Word Operations ====================

    /// Add a word to a session, merging into an existing entry by lookup key
    ///
    /// `user_raw` and `ai_raw` are raw slash-separated meaning strings;
    /// they are combined and normalized before insertion. Merging keeps
    /// the existing meanings first, follows with the new ones, refreshes
    /// `updated_at` and leaves the quiz counters untouched. The session
    /// is created when absent.
    pub fn add_or_merge(
        &mut self,
        session: &str,
        word: &str,
        user_raw: &str,
        ai_raw: &str,
    ) -> Result<AddOutcome> {
        let word = word.trim();
        if word.is_empty() {
            return Err(StoreError::EmptyWord);
        }
        let key = lookup_key(word);
        let incoming = normalize_meanings(&format!("{}/{}", user_raw, ai_raw));

        let idx = self.ensure_session(session)?;
        let session = &mut self.sessions[idx];
        let now = Utc::now();

        let outcome = match session.words.iter().position(|e| e.lookup_key() == key) {
            Some(pos) => {
                let entry = &mut session.words[pos];
                let combined =
                    format!("{}/{}", join_meanings(&entry.meanings), join_meanings(&incoming));
                entry.meanings = normalize_meanings(&combined);
                entry.updated_at = now;
                AddOutcome {
                    entry: entry.clone(),
                    merged: true,
                }
            }
            None => {
                let entry = WordEntry::new(word.to_string(), incoming);
                session.words.push(entry.clone());
                AddOutcome {
                    entry,
                    merged: false,
                }
            }
        };
        session.updated_at = now;
        self.save()?;
        Ok(outcome)
    }

    /// Replace an entry's meanings from a raw slash-separated string
    ///
    /// Returns false without writing when the normalized meanings are
    /// unchanged.
    pub fn edit_meanings(&mut self, session: &str, entry_id: Uuid, raw: &str) -> Result<bool> {
        let idx = self.session_index(session)?;
        let new_meanings = normalize_meanings(raw);
        let session = &mut self.sessions[idx];
        let pos = session
            .words
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or(StoreError::WordNotFound(entry_id))?;

        if session.words[pos].meanings == new_meanings {
            return Ok(false);
        }
        let now = Utc::now();
        session.words[pos].meanings = new_meanings;
        session.words[pos].updated_at = now;
        session.updated_at = now;
        self.save()?;
        Ok(true)
    }

    /// Delete an entry from a session
    pub fn delete_word(&mut self, session: &str, entry_id: Uuid) -> Result<WordEntry> {
        let idx = self.session_index(session)?;
        let session = &mut self.sessions[idx];
        let pos = session
            .words
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or(StoreError::WordNotFound(entry_id))?;
        let removed = session.words.remove(pos);
        session.updated_at = Utc::now();
        self.save()?;
        Ok(removed)
    }

    /// Remove entries that duplicate another entry's lookup key
    ///
    /// The last entry for a key wins and lands at the position where the
    /// key first appeared; the earlier duplicates (meanings and counters
    /// included) are discarded. Entries whose key is empty are dropped
    /// as well. Idempotent. Returns the number of entries removed.
    pub fn deduplicate_session(&mut self, session: &str) -> Result<usize> {
        let idx = self.session_index(session)?;
        let session = &mut self.sessions[idx];
        let before = session.words.len();

        let mut kept: Vec<WordEntry> = Vec::new();
        let mut slot_by_key: HashMap<String, usize> = HashMap::new();
        for entry in session.words.drain(..) {
            let key = entry.lookup_key();
            if key.is_empty() {
                continue;
            }
            match slot_by_key.get(&key) {
                Some(&slot) => kept[slot] = entry,
                None => {
                    slot_by_key.insert(key, kept.len());
                    kept.push(entry);
                }
            }
        }

        let removed = before - kept.len();
        session.words = kept;
        if removed > 0 {
            session.updated_at = Utc::now();
        }
        self.save()?;
        Ok(removed)
    }

    /// Record one quiz answer for an entry
    ///
    /// Only the counters change; `updated_at` keeps reflecting the last
    /// meanings edit.
    pub fn record_answer(&mut self, session: &str, entry_id: Uuid, correct: bool) -> Result<()> {
        let idx = self.session_index(session)?;
        let session = &mut self.sessions[idx];
        let entry = session
            .words
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(StoreError::WordNotFound(entry_id))?;
        if correct {
            entry.correct_count += 1;
        } else {
            entry.wrong_count += 1;
        }
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (VocabularyStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = VocabularyStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    fn reopen(temp_dir: &TempDir) -> VocabularyStorage {
        VocabularyStorage::new(temp_dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_create_session_and_list() {
        let (mut storage, _temp) = create_test_storage();

        storage.create_session("Unit1").unwrap();
        storage.create_session("Unit2").unwrap();

        let names: Vec<&str> = storage.sessions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Unit1", "Unit2"]);
        assert!(storage.session("Unit1").unwrap().words.is_empty());
    }

    #[test]
    fn test_create_session_rejects_empty_name() {
        let (mut storage, _temp) = create_test_storage();

        let result = storage.create_session("   ");
        assert!(matches!(result, Err(StoreError::EmptySessionName)));
    }

    #[test]
    fn test_create_session_rejects_duplicate() {
        let (mut storage, _temp) = create_test_storage();

        storage.create_session("Unit1").unwrap();
        let result = storage.create_session(" Unit1 ");
        assert!(matches!(result, Err(StoreError::SessionExists(_))));
    }

    #[test]
    fn test_add_creates_session_when_absent() {
        let (mut storage, _temp) = create_test_storage();

        let outcome = storage.add_or_merge("Unit1", "apple", "사과", "").unwrap();
        assert!(!outcome.merged);
        assert_eq!(outcome.entry.word, "apple");
        assert_eq!(outcome.entry.meanings, vec!["사과"]);
        assert_eq!(storage.entries("Unit1").unwrap().len(), 1);
    }

    #[test]
    fn test_add_rejects_empty_word() {
        let (mut storage, _temp) = create_test_storage();

        let result = storage.add_or_merge("Unit1", "   ", "사과", "");
        assert!(matches!(result, Err(StoreError::EmptyWord)));
        // No session appears for a rejected add
        assert!(storage.session("Unit1").is_none());
    }

    #[test]
    fn test_add_merges_same_lookup_key() {
        let (mut storage, _temp) = create_test_storage();

        storage.add_or_merge("Unit1", "apple", "사과", "").unwrap();
        let outcome = storage
            .add_or_merge("Unit1", " APPLE ", "과일", "")
            .unwrap();

        assert!(outcome.merged);
        let entries = storage.entries("Unit1").unwrap();
        assert_eq!(entries.len(), 1);
        // First insert's casing wins, meanings union keeps order
        assert_eq!(entries[0].word, "apple");
        assert_eq!(entries[0].meanings, vec!["사과", "과일"]);
    }

    #[test]
    fn test_merge_keeps_counters_and_refreshes_updated_at() {
        let (mut storage, _temp) = create_test_storage();

        let outcome = storage.add_or_merge("Unit1", "apple", "사과", "").unwrap();
        let id = outcome.entry.id;
        storage.record_answer("Unit1", id, false).unwrap();
        storage.record_answer("Unit1", id, true).unwrap();
        let before = storage.entries("Unit1").unwrap()[0].updated_at;

        storage.add_or_merge("Unit1", "apple", "과일", "").unwrap();

        let entry = &storage.entries("Unit1").unwrap()[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.wrong_count, 1);
        assert_eq!(entry.correct_count, 1);
        assert!(entry.updated_at >= before);
        assert_eq!(entry.meanings, vec!["사과", "과일"]);
    }

    #[test]
    fn test_add_combines_user_and_ai_meanings() {
        let (mut storage, _temp) = create_test_storage();

        let outcome = storage
            .add_or_merge("Unit1", "apple", "사과", "사과/과일")
            .unwrap();
        assert_eq!(outcome.entry.meanings, vec!["사과", "과일"]);
    }

    #[test]
    fn test_add_allows_empty_meanings() {
        let (mut storage, _temp) = create_test_storage();

        let outcome = storage.add_or_merge("Unit1", "apple", "", "").unwrap();
        assert!(outcome.entry.meanings.is_empty());
        assert_eq!(storage.entries("Unit1").unwrap().len(), 1);
    }

    #[test]
    fn test_edit_meanings_no_op_returns_false() {
        let (mut storage, _temp) = create_test_storage();

        let id = storage
            .add_or_merge("Unit1", "apple", "사과/과일", "")
            .unwrap()
            .entry
            .id;
        let before = storage.entries("Unit1").unwrap()[0].updated_at;

        // Same fragments after normalization
        let changed = storage.edit_meanings("Unit1", id, " 사과 / 과일 ").unwrap();
        assert!(!changed);
        assert_eq!(storage.entries("Unit1").unwrap()[0].updated_at, before);
    }

    #[test]
    fn test_edit_meanings_replaces_and_touches_updated_at() {
        let (mut storage, _temp) = create_test_storage();

        let id = storage
            .add_or_merge("Unit1", "apple", "사과", "")
            .unwrap()
            .entry
            .id;
        let before = storage.entries("Unit1").unwrap()[0].updated_at;

        let changed = storage.edit_meanings("Unit1", id, "과일/열매").unwrap();
        assert!(changed);
        let entry = &storage.entries("Unit1").unwrap()[0];
        assert_eq!(entry.meanings, vec!["과일", "열매"]);
        assert!(entry.updated_at >= before);
    }

    #[test]
    fn test_edit_meanings_unknown_id() {
        let (mut storage, _temp) = create_test_storage();

        storage.add_or_merge("Unit1", "apple", "사과", "").unwrap();
        let result = storage.edit_meanings("Unit1", Uuid::new_v4(), "과일");
        assert!(matches!(result, Err(StoreError::WordNotFound(_))));
    }

    #[test]
    fn test_delete_word() {
        let (mut storage, _temp) = create_test_storage();

        let id = storage
            .add_or_merge("Unit1", "apple", "사과", "")
            .unwrap()
            .entry
            .id;
        storage.add_or_merge("Unit1", "banana", "바나나", "").unwrap();

        let removed = storage.delete_word("Unit1", id).unwrap();
        assert_eq!(removed.word, "apple");

        let entries = storage.entries("Unit1").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "banana");
    }

    #[test]
    fn test_record_answer_keeps_updated_at() {
        let (mut storage, _temp) = create_test_storage();

        let id = storage
            .add_or_merge("Unit1", "apple", "사과", "")
            .unwrap()
            .entry
            .id;
        let before = storage.entries("Unit1").unwrap()[0].updated_at;

        storage.record_answer("Unit1", id, false).unwrap();
        storage.record_answer("Unit1", id, false).unwrap();
        storage.record_answer("Unit1", id, true).unwrap();

        let entry = &storage.entries("Unit1").unwrap()[0];
        assert_eq!(entry.wrong_count, 2);
        assert_eq!(entry.correct_count, 1);
        assert_eq!(entry.updated_at, before);
    }

    #[test]
    fn test_dedup_last_wins_at_first_position() {
        let (mut storage, temp) = create_test_storage();

        // Duplicates cannot appear through add_or_merge, so write a
        // store document with them directly and reload.
        storage.create_session("Unit1").unwrap();
        let mut sessions: Vec<Session> = storage.sessions().to_vec();
        let mut first = WordEntry::new("apple".to_string(), vec!["사과".to_string()]);
        first.wrong_count = 5;
        let banana = WordEntry::new("banana".to_string(), vec!["바나나".to_string()]);
        let mut last = WordEntry::new(" APPLE ".to_string(), vec!["과일".to_string()]);
        last.wrong_count = 1;
        let blank = WordEntry::new("   ".to_string(), vec![]);
        sessions[0].words = vec![first, banana, last.clone(), blank];
        fs::write(
            storage.store_path(),
            serde_json::to_string_pretty(&sessions).unwrap(),
        )
        .unwrap();

        let mut storage = reopen(&temp);
        let removed = storage.deduplicate_session("Unit1").unwrap();
        assert_eq!(removed, 2);

        let entries = storage.entries("Unit1").unwrap();
        assert_eq!(entries.len(), 2);
        // Last duplicate won, at the key's first position
        assert_eq!(entries[0].word, " APPLE ");
        assert_eq!(entries[0].id, last.id);
        assert_eq!(entries[0].meanings, vec!["과일"]);
        assert_eq!(entries[0].wrong_count, 1);
        assert_eq!(entries[1].word, "banana");

        // Idempotent
        let removed_again = storage.deduplicate_session("Unit1").unwrap();
        assert_eq!(removed_again, 0);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.sessions().is_empty());
        assert!(storage.recovered_from().is_none());
    }

    #[test]
    fn test_corrupt_file_moved_aside_and_store_continues_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("voca.json");
        fs::write(&store_path, "{ not json").unwrap();

        let storage = VocabularyStorage::new(temp_dir.path().to_path_buf()).unwrap();
        assert!(storage.sessions().is_empty());

        let broken = temp_dir.path().join("voca.json.broken");
        assert_eq!(storage.recovered_from(), Some(broken.as_path()));
        assert!(broken.exists());
        assert_eq!(fs::read_to_string(&broken).unwrap(), "{ not json");
        assert!(!store_path.exists());
    }

    #[test]
    fn test_save_then_reload_round_trips() {
        let (mut storage, temp) = create_test_storage();

        storage.add_or_merge("Unit1", "apple", "사과/과일", "").unwrap();
        let id = storage.entries("Unit1").unwrap()[0].id;
        storage.record_answer("Unit1", id, false).unwrap();
        storage.add_or_merge("Unit2", "banana", "바나나", "").unwrap();

        let reloaded = reopen(&temp);
        assert_eq!(reloaded.sessions().len(), 2);
        let entry = &reloaded.entries("Unit1").unwrap()[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.word, "apple");
        assert_eq!(entry.meanings, vec!["사과", "과일"]);
        assert_eq!(entry.wrong_count, 1);

        // Atomic save leaves no temp file behind
        assert!(!temp.path().join("voca.json.tmp").exists());
    }

    #[test]
    fn test_entries_unknown_session() {
        let (storage, _temp) = create_test_storage();
        let result = storage.entries("nope");
        assert!(matches!(result, Err(StoreError::SessionNotFound(_))));
    }
}
