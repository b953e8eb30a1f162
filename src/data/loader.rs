//! Loads the question pool from JSON.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::Question;

/// The question pool shipped with the game.
const BUILTIN_QUESTIONS: &str = include_str!("../../questions.json");

/// Error loading a question file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read question file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse question file")]
    Parse(#[from] serde_json::Error),
    #[error("question file contains no questions")]
    Empty,
}

/// Load questions from a JSON file at `path`.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let content = fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&content)?;
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(questions)
}

/// The built-in question pool.
pub fn builtin_questions() -> Vec<Question> {
    // The embedded file is validated by the tests below.
    serde_json::from_str(BUILTIN_QUESTIONS).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pool_parses_and_is_not_empty() {
        let pool = builtin_questions();
        assert!(!pool.is_empty());
        assert!(pool.iter().all(|q| !q.prompt.is_empty()));
    }

    #[test]
    fn builtin_pool_includes_the_bones_question() {
        let pool = builtin_questions();
        let bones = pool
            .iter()
            .find(|q| q.prompt.contains("bones"))
            .expect("bones question present");
        assert_eq!(bones.answer, 206.0);
        assert_eq!(bones.unit, "bones");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_questions_from_json("no-such-file.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
