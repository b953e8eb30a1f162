//! Protocol messages for host-client communication.
//!
//! All messages are serialized as JSON over WebSocket. Broadcasts always
//! carry the complete value of the fields they describe (the full roster,
//! the full answered set, the full results list) so that applying one is a
//! total replacement of the corresponding client-side field, never a delta.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GameError;

/// Messages sent from a client to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Bind a display name to this participant.
    SetName { name: String },

    /// Submit a guess for the current round. The first submission per round
    /// is final; the host ignores any later ones.
    Answer { value: f64 },
}

/// Messages sent from the host to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Sent once after admission; carries the participant's assigned id so
    /// the client can recognize itself in later broadcasts.
    RequestName { id: Uuid },

    /// Complete roster, host first, then clients in join order.
    PlayerList { players: Vec<PlayerEntry> },

    /// The game is starting; questions follow.
    GameStart { total_rounds: usize },

    /// A new round has opened.
    Question {
        prompt: String,
        unit: String,
        round_index: usize,
        total_rounds: usize,
        deadline_secs: u64,
    },

    /// Complete set of participant ids that have submitted this round.
    AnswerStatus { answered_ids: Vec<Uuid> },

    /// A round has closed and been scored.
    RoundResults {
        correct_answer: f64,
        unit: String,
        results: Vec<RoundResultEntry>,
        round_index: usize,
        total_rounds: usize,
        is_last_round: bool,
    },

    /// Final standings, cumulative score descending.
    GameOver { standings: Vec<PlayerEntry> },

    /// Terminal notice for this channel (room full, game already started).
    Error { message: String },
}

/// One participant as seen in roster broadcasts and final standings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: Uuid,
    pub name: String,
    pub score: u32,
    pub is_host: bool,
}

/// One participant's line in a round's results.
///
/// `guess` is absent when the participant never submitted; they score 0 for
/// the round but still appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResultEntry {
    pub id: Uuid,
    pub name: String,
    pub guess: Option<f64>,
    pub points: u32,
    pub total_score: u32,
}

/// Maximum display name length.
pub const NAME_MAX_LENGTH: usize = 16;

/// Validates a display name: non-empty after trimming, bounded length.
pub fn validate_display_name(name: &str) -> Result<&str, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Enter a name.");
    }
    if trimmed.chars().count() > NAME_MAX_LENGTH {
        return Err("Name must be at most 16 characters.");
    }
    Ok(trimmed)
}

/// Parse user input into a guess.
///
/// Rejects empty and non-numeric input before anything reaches the wire.
pub fn parse_guess(input: &str) -> Result<f64, GameError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GameError::InvalidGuess {
            reason: "enter a number",
        });
    }
    let value: f64 = trimmed.parse().map_err(|_| GameError::InvalidGuess {
        reason: "not a valid number",
    })?;
    if !value.is_finite() {
        return Err(GameError::InvalidGuess {
            reason: "not a valid number",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_tags_are_kebab_case() {
        let msg = ClientMessage::SetName {
            name: "Alice".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"set-name\""));

        let msg = ServerMessage::GameStart { total_rounds: 10 };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"game-start\""));

        let msg = ServerMessage::AnswerStatus {
            answered_ids: vec![],
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"answer-status\""));
    }

    #[test]
    fn answer_round_trips() {
        let json = serde_json::to_string(&ClientMessage::Answer { value: 206.0 }).unwrap();
        let back: ClientMessage = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, ClientMessage::Answer { value } if value == 206.0));
    }

    #[test]
    fn absent_guess_serializes_as_null() {
        let entry = RoundResultEntry {
            id: Uuid::new_v4(),
            name: "Ghost".to_string(),
            guess: None,
            points: 0,
            total_score: 120,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"guess\":null"));
    }

    #[test]
    fn validate_display_name_rules() {
        assert_eq!(validate_display_name("Alice"), Ok("Alice"));
        assert_eq!(validate_display_name("  Bob  "), Ok("Bob"));
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name("abcdefghijklmnopq").is_err()); // 17 chars
    }

    #[test]
    fn parse_guess_accepts_numbers() {
        assert_eq!(parse_guess("206").unwrap(), 206.0);
        assert_eq!(parse_guess(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_guess("-4").unwrap(), -4.0);
    }

    #[test]
    fn parse_guess_rejects_junk() {
        assert!(parse_guess("").is_err());
        assert!(parse_guess("   ").is_err());
        assert!(parse_guess("abc").is_err());
        assert!(parse_guess("12abc").is_err());
        assert!(parse_guess("NaN").is_err());
        assert!(parse_guess("inf").is_err());
    }
}
