//! Host role.
//!
//! The host owns the authoritative session state and broadcasts every state
//! transition to the connected clients.

mod host;
mod round;
mod session;
mod ui;

pub use host::{run, HostApp, HostConfig};
pub use round::{Round, SubmitOutcome};
pub use session::{
    AdmitOutcome, AdvanceOutcome, Participant, Phase, RoundOutcome, RoundStarted, Session,
    MAX_CLIENTS, ROUNDS_PER_GAME, ROUND_SECS,
};
