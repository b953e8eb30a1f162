//! # numbers-game
//!
//! A round-based estimation contest played in the terminal. One participant
//! hosts a session; up to seven others join it with a 4-letter room code.
//! Each round everyone guesses a number, the closest guesses score the most
//! points, and after ten rounds the highest total wins.
//!
//! The host holds the authoritative session state and broadcasts every state
//! transition as JSON over WebSocket; clients are passive replicas that only
//! send their name and their answers.
//!
//! ## Usage
//!
//! ```text
//! numbers-game host              # host a session, prints a room code
//! numbers-game join KRPX         # join with a room code
//! ```

pub mod client;
pub mod data;
pub mod error;
pub mod host;
pub mod models;
pub mod protocol;
pub mod scoring;
pub mod transport;
mod ui;

pub use error::GameError;
