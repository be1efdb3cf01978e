//! Local persistence module
//!
//! A flat key/value store abstraction with a JSON-file backend, the
//! completed-level progress record layered on top of it, and rotating
//! storage for past quiz results.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::QuizResult;
use crate::{QuizError, Result, APP_NAME, MAX_RESULTS_HISTORY, PROGRESS_FILE, RESULTS_FILE};

/// Flat key -> string mapping, decoupled from any platform storage API.
/// Values are opaque to the store; callers decide the encoding.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used in tests and as a fallback when no data
/// directory is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Key/value store persisted as a single JSON object on disk.
/// Every `set` rewrites the file; records are small and infrequent.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open (or create) a store at an explicit path
    pub fn open(path: PathBuf) -> Result<Self> {
        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to read store file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to parse store file {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            HashMap::new()
        };
        Ok(Self { path, values })
    }

    /// Open the standard progress store under the app data directory
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            QuizError::PersistenceError("Unable to determine data directory".to_string())
        })?;
        Self::open(data_dir.join(APP_NAME).join(PROGRESS_FILE))
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to write store file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            log::warn!("store: failed to persist {:?}: {}", key, e);
        }
    }
}

/// Which levels have been completed, persisted as a comma-joined string
/// of level numbers under a single key.
#[derive(Debug)]
pub struct CompletedLevels<S: KeyValueStore> {
    store: S,
    completed: BTreeSet<u32>,
}

const COMPLETED_LEVELS_KEY: &str = "CompletedLevels";

impl<S: KeyValueStore> CompletedLevels<S> {
    /// Load the completed set from the backing store. Unparseable
    /// entries are skipped, not fatal.
    pub fn load(store: S) -> Self {
        let mut completed = BTreeSet::new();
        if let Some(saved) = store.get(COMPLETED_LEVELS_KEY) {
            for part in saved.split(',').filter(|p| !p.is_empty()) {
                match part.trim().parse::<u32>() {
                    Ok(level) => {
                        completed.insert(level);
                    }
                    Err(_) => {
                        log::warn!("progress: skipping malformed level id {:?}", part);
                    }
                }
            }
        }
        log::info!("progress: loaded {} completed level(s)", completed.len());
        Self { store, completed }
    }

    pub fn is_level_completed(&self, level_number: u32) -> bool {
        self.completed.contains(&level_number)
    }

    /// Mark a level completed and persist. Already-completed levels are
    /// a no-op, matching the single boolean-set semantics.
    pub fn mark_level_completed(&mut self, level_number: u32) {
        if !self.completed.insert(level_number) {
            return;
        }
        let joined = self
            .completed
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.store.set(COMPLETED_LEVELS_KEY, &joined);
        log::info!("progress: level {} completed", level_number);
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Lowest level number not yet completed, starting from 1
    pub fn first_uncompleted(&self) -> u32 {
        let mut level = 1;
        while self.completed.contains(&level) {
            level += 1;
        }
        level
    }
}

/// Results file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct ResultsFile {
    version: u32,
    results: Vec<QuizResult>,
}

impl Default for ResultsFile {
    fn default() -> Self {
        Self {
            version: 1,
            results: Vec::new(),
        }
    }
}

/// Rotating storage for past quiz results
#[derive(Debug)]
pub struct ResultsStorage {
    results_path: PathBuf,
}

impl ResultsStorage {
    /// Create a results storage at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self {
            results_path: Self::results_file_path()?,
        })
    }

    /// Create a results storage at an explicit path (used by tests)
    pub fn with_path(results_path: PathBuf) -> Self {
        Self { results_path }
    }

    /// Get the standard results file path
    /// Uses $DATA_HOME/quizbird/results.json
    pub fn results_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            QuizError::PersistenceError("Unable to determine data directory".to_string())
        })?;
        Ok(data_dir.join(APP_NAME).join(RESULTS_FILE))
    }

    /// Load all stored results, oldest first
    pub fn load_results(&self) -> Result<Vec<QuizResult>> {
        if !self.results_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.results_path).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to read results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        let results_file: ResultsFile = serde_json::from_str(&content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to parse results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(results_file.results)
    }

    /// Append a new result, rotating out the oldest entries once the
    /// file exceeds `MAX_RESULTS_HISTORY`
    pub fn append_result(&self, result: QuizResult) -> Result<()> {
        let mut results = self.load_results()?;
        results.push(result);

        if results.len() > MAX_RESULTS_HISTORY {
            let skip_count = results.len() - MAX_RESULTS_HISTORY;
            results = results.into_iter().skip(skip_count).collect();
        }

        self.save_results(results)
    }

    /// Get the most recent N results, newest last
    pub fn recent_results(&self, count: usize) -> Result<Vec<QuizResult>> {
        let results = self.load_results()?;
        if results.len() <= count {
            Ok(results)
        } else {
            let skip_count = results.len() - count;
            Ok(results.into_iter().skip(skip_count).collect())
        }
    }

    fn save_results(&self, results: Vec<QuizResult>) -> Result<()> {
        if let Some(parent) = self.results_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to create results directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let results_file = ResultsFile {
            version: 1,
            results,
        };
        let content = serde_json::to_string_pretty(&results_file)?;
        fs::write(&self.results_path, content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to write results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        store.set("ProfileData", "{\"name\":\"kid\"}");
        assert_eq!(store.get("ProfileData").as_deref(), Some("{\"name\":\"kid\"}"));
    }

    #[test]
    fn test_json_file_store_persists_across_opens() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.json");

        {
            let mut store = JsonFileStore::open(path.clone()).unwrap();
            store.set("CompletedLevels", "1,2,5");
        }

        let store = JsonFileStore::open(path).unwrap();
        assert_eq!(store.get("CompletedLevels").as_deref(), Some("1,2,5"));
    }

    #[test]
    fn test_completed_levels_format() {
        let mut progress = CompletedLevels::load(MemoryStore::new());
        assert!(!progress.is_level_completed(1));
        assert_eq!(progress.first_uncompleted(), 1);

        progress.mark_level_completed(2);
        progress.mark_level_completed(1);
        progress.mark_level_completed(2);

        assert!(progress.is_level_completed(1));
        assert!(progress.is_level_completed(2));
        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.first_uncompleted(), 3);
        assert_eq!(
            progress.store.get(COMPLETED_LEVELS_KEY).as_deref(),
            Some("1,2")
        );
    }

    #[test]
    fn test_completed_levels_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set(COMPLETED_LEVELS_KEY, "1,zap,3,");
        let progress = CompletedLevels::load(store);
        assert!(progress.is_level_completed(1));
        assert!(progress.is_level_completed(3));
        assert_eq!(progress.completed_count(), 2);
    }

    fn test_result(level: u32) -> QuizResult {
        QuizResult::new(level, 4, 1, 40, Duration::from_secs(30))
    }

    #[test]
    fn test_results_append_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ResultsStorage::with_path(temp_dir.path().join("results.json"));

        assert!(storage.load_results().unwrap().is_empty());
        storage.append_result(test_result(1)).unwrap();
        storage.append_result(test_result(2)).unwrap();

        let results = storage.load_results().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].level_number, 1);
        assert_eq!(results[1].level_number, 2);
    }

    #[test]
    fn test_results_rotation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ResultsStorage::with_path(temp_dir.path().join("results.json"));

        for level in 0..(MAX_RESULTS_HISTORY as u32 + 5) {
            storage.append_result(test_result(level)).unwrap();
        }

        let results = storage.load_results().unwrap();
        assert_eq!(results.len(), MAX_RESULTS_HISTORY);
        // Oldest entries rotated out.
        assert_eq!(results[0].level_number, 5);
    }

    #[test]
    fn test_recent_results() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ResultsStorage::with_path(temp_dir.path().join("results.json"));
        for level in 1..=10 {
            storage.append_result(test_result(level)).unwrap();
        }

        let recent = storage.recent_results(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].level_number, 8);
        assert_eq!(recent[2].level_number, 10);
    }
}
