//! Host TUI screens.

mod lobby;
mod question;
mod results;

use ratatui::prelude::*;
use ratatui::widgets::Block;

use super::host::HostApp;
use super::session::Phase;

/// Render the host UI for the current phase.
pub fn render(frame: &mut Frame, app: &HostApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session.phase() {
        Phase::Lobby => lobby::render(frame, area, app),
        Phase::InRound => question::render(frame, area, app),
        Phase::RoundResults => results::render_round(frame, area, app),
        Phase::Finished => results::render_final(frame, area, app),
    }
}
