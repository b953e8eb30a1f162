//! Client role.
//!
//! A client's view of the game is a replica rebuilt from host broadcasts;
//! it only ever sends its name and its answers.

mod client;
mod state;
mod ui;

pub use client::{run, JoinConfig};
pub use state::{ClientApp, ClientPhase, ResultsView, RoundView};
