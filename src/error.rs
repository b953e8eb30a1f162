//! Error types for the game protocol and session layers.

use thiserror::Error;

/// Errors surfaced by the session protocol.
///
/// Every variant is scoped to a single channel or a single request; none of
/// them invalidates the session itself. `NameCollision` is recoverable: the
/// caller regenerates the room code and retries.
#[derive(Debug, Error)]
pub enum GameError {
    /// The roster already holds the maximum number of clients.
    #[error("game is full (max {max} players)")]
    RoomFull { max: usize },

    /// The room code mapped to a transport address that is already claimed.
    #[error("room code {code} is already in use")]
    NameCollision { code: String },

    /// Input that could not be interpreted as a numeric guess.
    #[error("invalid guess: {reason}")]
    InvalidGuess { reason: &'static str },

    /// A room code that is not four letters from the code alphabet.
    #[error("invalid room code: {reason}")]
    InvalidCode { reason: &'static str },

    /// The peer's channel closed; the participant is gone.
    #[error("channel closed")]
    ChannelClosed,

    /// The operation is not legal in the current session phase.
    #[error("{reason}")]
    Phase { reason: &'static str },

    /// Underlying transport failure (socket, handshake, serialization).
    #[error("connection failed")]
    Transport(#[source] std::io::Error),
}
