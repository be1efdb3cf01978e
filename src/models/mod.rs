//! Data models module
//!
//! Contains the quiz result snapshot produced at level completion and
//! its derived metrics (accuracy, letter grade, star rating).

pub mod result;

// Re-export commonly used types
pub use result::QuizResult;
