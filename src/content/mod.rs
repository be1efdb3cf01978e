//! Quiz content model
//!
//! Grades, levels, and questions as loaded from JSON content packs,
//! plus the read-only provider the session pulls level data from.

use serde::{Deserialize, Serialize};

use crate::{QuizError, Result};

/// A single quiz question with its candidate answers.
///
/// Correctness is decided by string equality against `right_answer`,
/// not by a stored index. If two candidates carry identical text the
/// first matching index is treated as correct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text shown to the player
    #[serde(rename = "question")]
    pub prompt: String,
    /// Ordered candidate answers (4 by content-authoring convention)
    #[serde(rename = "answer")]
    pub answers: Vec<String>,
    /// The correct answer, by value
    #[serde(rename = "rightAnswer")]
    pub right_answer: String,
}

impl Question {
    /// Whether the candidate at `index` matches the stored correct answer.
    /// Out-of-range indices are simply not correct.
    pub fn is_correct(&self, index: usize) -> bool {
        self.answers
            .get(index)
            .map(|candidate| *candidate == self.right_answer)
            .unwrap_or(false)
    }
}

/// An ordered set of questions played as one attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    #[serde(rename = "levelNumber")]
    pub level_number: u32,
    pub questions: Vec<Question>,
}

/// An ordered set of levels, indexed by ordinal - 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub grade: u32,
    pub levels: Vec<Level>,
}

/// Top-level content pack file structure
#[derive(Debug, Serialize, Deserialize)]
struct ContentPack {
    grades: Vec<Grade>,
}

/// Read-only provider for quiz content.
///
/// Owns every grade loaded from a content pack; the session and the
/// level-select screen only ever borrow from it.
#[derive(Debug)]
pub struct ContentProvider {
    grades: Vec<Grade>,
}

impl ContentProvider {
    /// Load and validate a content pack from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let pack: ContentPack = serde_json::from_str(json)
            .map_err(|e| QuizError::ContentError(format!("failed to parse content pack: {}", e)))?;
        let provider = Self {
            grades: pack.grades,
        };
        provider.validate()?;
        log::info!(
            "content: loaded {} grade(s), {} level(s) total",
            provider.grades.len(),
            provider.grades.iter().map(|g| g.levels.len()).sum::<usize>()
        );
        Ok(provider)
    }

    /// Load a content pack from a file on disk
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuizError::ContentError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// The question pack shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(include_str!("builtin_questions.json"))
    }

    /// Look up a grade by its ordinal
    pub fn grade(&self, ordinal: u32) -> Result<&Grade> {
        self.grades
            .iter()
            .find(|g| g.grade == ordinal)
            .ok_or(QuizError::GradeNotFound(ordinal))
    }

    /// Number of grades in the pack
    pub fn grade_count(&self) -> usize {
        self.grades.len()
    }

    fn validate(&self) -> Result<()> {
        if self.grades.is_empty() {
            return Err(QuizError::ContentError(
                "content pack contains no grades".to_string(),
            ));
        }
        for grade in &self.grades {
            for level in &grade.levels {
                for (i, question) in level.questions.iter().enumerate() {
                    if question.answers.len() < 2 {
                        return Err(QuizError::ContentError(format!(
                            "grade {} level {} question {} has fewer than 2 answers",
                            grade.grade, level.level_number, i
                        )));
                    }
                    if !question.answers.contains(&question.right_answer) {
                        return Err(QuizError::ContentError(format!(
                            "grade {} level {} question {}: right answer {:?} is not among the candidates",
                            grade.grade, level.level_number, i, question.right_answer
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pack() -> &'static str {
        r#"{
            "grades": [{
                "grade": 1,
                "levels": [{
                    "levelNumber": 1,
                    "questions": [{
                        "question": "2+2?",
                        "answer": ["3", "4", "5", "6"],
                        "rightAnswer": "4"
                    }]
                }]
            }]
        }"#
    }

    #[test]
    fn test_load_sample_pack() {
        let provider = ContentProvider::from_json(sample_pack()).unwrap();
        assert_eq!(provider.grade_count(), 1);
        let grade = provider.grade(1).unwrap();
        assert_eq!(grade.levels.len(), 1);
        assert_eq!(grade.levels[0].questions[0].prompt, "2+2?");
    }

    #[test]
    fn test_unknown_grade() {
        let provider = ContentProvider::from_json(sample_pack()).unwrap();
        assert!(matches!(
            provider.grade(7),
            Err(QuizError::GradeNotFound(7))
        ));
    }

    #[test]
    fn test_correctness_is_by_string_match() {
        let question = Question {
            prompt: "pick".to_string(),
            answers: vec!["a".into(), "b".into(), "b".into(), "c".into()],
            right_answer: "b".to_string(),
        };
        // Duplicate text: both matching indices count as correct.
        assert!(question.is_correct(1));
        assert!(question.is_correct(2));
        assert!(!question.is_correct(0));
        assert!(!question.is_correct(42));
    }

    #[test]
    fn test_right_answer_must_be_a_candidate() {
        let bad = r#"{
            "grades": [{
                "grade": 1,
                "levels": [{
                    "levelNumber": 1,
                    "questions": [{
                        "question": "2+2?",
                        "answer": ["3", "5"],
                        "rightAnswer": "4"
                    }]
                }]
            }]
        }"#;
        assert!(matches!(
            ContentProvider::from_json(bad),
            Err(QuizError::ContentError(_))
        ));
    }

    #[test]
    fn test_builtin_pack_is_valid() {
        let provider = ContentProvider::builtin().unwrap();
        assert!(provider.grade_count() >= 1);
        assert!(!provider.grade(1).unwrap().levels.is_empty());
    }
}
