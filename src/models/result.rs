//! Quiz result data model
//!
//! Immutable snapshot produced once per level completion, with derived
//! accuracy, letter grade, and star rating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::util::duration_serde;

/// Complete result of one level attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    /// Timestamp when the attempt finished
    pub timestamp: DateTime<Utc>,
    /// Level ordinal this attempt was played on
    pub level_number: u32,
    /// Questions actually answered (including forced-wrong timeouts)
    pub total_questions: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    /// Accumulated integer score
    pub score: u32,
    /// Elapsed time for the whole attempt
    #[serde(with = "duration_serde")]
    pub time_taken: Duration,
    /// `correct / answered * 100`, zero when nothing was answered
    pub accuracy_percentage: f32,
    /// Letter grade derived from accuracy
    pub grade: String,
    /// Star rating (1-5) derived from accuracy
    pub stars: u8,
}

impl QuizResult {
    /// Build a result snapshot and compute its derived metrics
    pub fn new(
        level_number: u32,
        correct_answers: u32,
        wrong_answers: u32,
        score: u32,
        time_taken: Duration,
    ) -> Self {
        let total_questions = correct_answers + wrong_answers;
        let accuracy_percentage = if total_questions > 0 {
            correct_answers as f32 / total_questions as f32 * 100.0
        } else {
            0.0
        };

        Self {
            timestamp: Utc::now(),
            level_number,
            total_questions,
            correct_answers,
            wrong_answers,
            score,
            time_taken,
            accuracy_percentage,
            grade: Self::letter_grade(accuracy_percentage).to_string(),
            stars: Self::star_rating(accuracy_percentage),
        }
    }

    /// Letter grade breakpoints, monotone non-decreasing in accuracy
    fn letter_grade(accuracy: f32) -> &'static str {
        if accuracy >= 95.0 {
            "A+"
        } else if accuracy >= 90.0 {
            "A"
        } else if accuracy >= 85.0 {
            "A-"
        } else if accuracy >= 80.0 {
            "B+"
        } else if accuracy >= 75.0 {
            "B"
        } else if accuracy >= 70.0 {
            "B-"
        } else if accuracy >= 65.0 {
            "C+"
        } else if accuracy >= 60.0 {
            "C"
        } else if accuracy >= 55.0 {
            "C-"
        } else if accuracy >= 50.0 {
            "D"
        } else {
            "F"
        }
    }

    /// Star rating (1-5), monotone non-decreasing in accuracy
    fn star_rating(accuracy: f32) -> u8 {
        if accuracy >= 90.0 {
            5
        } else if accuracy >= 80.0 {
            4
        } else if accuracy >= 70.0 {
            3
        } else if accuracy >= 60.0 {
            2
        } else {
            1
        }
    }

    /// Time taken formatted as MM:SS
    pub fn formatted_time(&self) -> String {
        let total = self.time_taken.as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    /// Short message for the result card
    pub fn performance_message(&self) -> &'static str {
        if self.accuracy_percentage >= 90.0 {
            "Excellent work!"
        } else if self.accuracy_percentage >= 80.0 {
            "Great job!"
        } else if self.accuracy_percentage >= 70.0 {
            "Good effort!"
        } else if self.accuracy_percentage >= 60.0 {
            "Not bad!"
        } else {
            "Keep practicing!"
        }
    }

    /// One-line summary for lists and logs
    pub fn summary(&self) -> String {
        format!(
            "{} - Level {} - {}/{} correct - {} pts - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.level_number,
            self.correct_answers,
            self.total_questions,
            self.score,
            self.grade,
            self.formatted_time()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_run() {
        let result = QuizResult::new(1, 5, 0, 50, Duration::from_secs(42));
        assert_eq!(result.total_questions, 5);
        assert_eq!(result.accuracy_percentage, 100.0);
        assert_eq!(result.grade, "A+");
        assert_eq!(result.stars, 5);
        assert_eq!(result.formatted_time(), "00:42");
    }

    #[test]
    fn test_empty_level_result() {
        let result = QuizResult::new(3, 0, 0, 0, Duration::ZERO);
        assert_eq!(result.total_questions, 0);
        assert_eq!(result.accuracy_percentage, 0.0);
        assert_eq!(result.grade, "F");
        assert_eq!(result.stars, 1);
    }

    #[test]
    fn test_grades_and_stars_are_monotonic() {
        let accuracies: Vec<f32> = (0..=100).map(|p| p as f32).collect();
        let mut last_stars = 0u8;
        for accuracy in accuracies {
            let stars = QuizResult::star_rating(accuracy);
            assert!(stars >= last_stars, "stars regressed at {}%", accuracy);
            last_stars = stars;
        }
        assert_eq!(QuizResult::letter_grade(94.9), "A");
        assert_eq!(QuizResult::letter_grade(95.0), "A+");
        assert_eq!(QuizResult::letter_grade(49.9), "F");
    }

    #[test]
    fn test_formatted_time_rolls_minutes() {
        let result = QuizResult::new(1, 3, 2, 30, Duration::from_secs(125));
        assert_eq!(result.formatted_time(), "02:05");
        assert_eq!(result.accuracy_percentage, 60.0);
        assert_eq!(result.stars, 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let result = QuizResult::new(2, 4, 1, 40, Duration::from_secs(61));
        let json = serde_json::to_string(&result).unwrap();
        let back: QuizResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level_number, 2);
        assert_eq!(back.time_taken, Duration::from_secs(61));
        assert_eq!(back.grade, result.grade);
    }
}
