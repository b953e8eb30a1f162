use serde::{Deserialize, Serialize};

/// An estimation question: a prompt with a single numeric answer.
///
/// `unit` may be empty (e.g. for year questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answer: f64,
    #[serde(default)]
    pub unit: String,
}
