//! Configuration management module
//!
//! Handles loading, saving, and validation of quiz gameplay settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::{QuizError, Result, APP_NAME, CONFIG_FILE};

/// Gameplay settings for a quiz session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Questions served per level attempt (the level may hold more)
    pub questions_per_level: usize,
    /// Countdown per question
    pub time_per_question: Duration,
    /// Points awarded per correct answer
    pub points_per_correct: u32,
    /// Delay between locking an answer and serving the next question
    pub answer_reveal_delay: Duration,
    /// Candidate answers per question; a content-authoring convention,
    /// not a hard algorithmic limit
    pub answers_per_question: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_per_level: 5,
            time_per_question: Duration::from_secs(10),
            points_per_correct: 10,
            answer_reveal_delay: Duration::from_millis(1500),
            answers_per_question: 4,
        }
    }
}

impl QuizConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of questions per level
    pub fn with_questions_per_level(mut self, count: usize) -> Self {
        self.questions_per_level = count;
        self
    }

    /// Set the per-question countdown
    pub fn with_time_per_question(mut self, duration: Duration) -> Self {
        self.time_per_question = duration;
        self
    }

    /// Set the points awarded per correct answer
    pub fn with_points_per_correct(mut self, points: u32) -> Self {
        self.points_per_correct = points;
        self
    }

    /// Set the answer feedback delay
    pub fn with_answer_reveal_delay(mut self, delay: Duration) -> Self {
        self.answer_reveal_delay = delay;
        self
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.questions_per_level == 0 {
            return Err(QuizError::ConfigError(
                "Questions per level must be greater than 0".to_string(),
            ));
        }

        const MAX_QUESTIONS_PER_LEVEL: usize = 50;
        if self.questions_per_level > MAX_QUESTIONS_PER_LEVEL {
            return Err(QuizError::ConfigError(format!(
                "Too many questions per level: {} (max: {})",
                self.questions_per_level, MAX_QUESTIONS_PER_LEVEL
            )));
        }

        if self.time_per_question.is_zero() {
            return Err(QuizError::ConfigError(
                "Time per question must be greater than 0".to_string(),
            ));
        }

        const MAX_TIME_PER_QUESTION: Duration = Duration::from_secs(300);
        if self.time_per_question > MAX_TIME_PER_QUESTION {
            return Err(QuizError::ConfigError(format!(
                "Time per question too long: {}s (max: {}s)",
                self.time_per_question.as_secs(),
                MAX_TIME_PER_QUESTION.as_secs()
            )));
        }

        const MAX_REVEAL_DELAY: Duration = Duration::from_secs(10);
        if self.answer_reveal_delay > MAX_REVEAL_DELAY {
            return Err(QuizError::ConfigError(format!(
                "Answer reveal delay too long: {:?} (max: {:?})",
                self.answer_reveal_delay, MAX_REVEAL_DELAY
            )));
        }

        if self.answers_per_question < 2 {
            return Err(QuizError::ConfigError(
                "Answers per question must be at least 2".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the standard config file path
    /// Uses $CONFIG_HOME/quizbird/quizbird.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
