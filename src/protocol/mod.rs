//! Replication protocol between host and clients.
//!
//! The host is the single source of truth; clients rebuild their view from
//! host broadcasts. Only two requests flow the other way: `set-name` and
//! `answer`.

mod messages;

pub use messages::{
    parse_guess, validate_display_name, ClientMessage, PlayerEntry, RoundResultEntry,
    ServerMessage, NAME_MAX_LENGTH,
};
