//! Client TUI screens.

mod lobby;
mod name_entry;
mod question;
mod results;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::ui::centered;

use super::state::{ClientApp, ClientPhase};

/// Render the client UI based on current phase.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.phase {
        ClientPhase::Connecting => render_connecting(frame, area, app),
        ClientPhase::NameEntry { .. } => name_entry::render(frame, area, app),
        ClientPhase::Lobby => lobby::render(frame, area, app),
        ClientPhase::InRound(_) => question::render(frame, area, app),
        ClientPhase::RoundResults(_) => results::render_round(frame, area, app),
        ClientPhase::GameOver { .. } => results::render_final(frame, area, app),
        ClientPhase::Disconnected { message } => render_disconnected(frame, area, message),
    }
}

fn render_connecting(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let content = vec![
        Line::from(Span::styled(
            "NUMBERS GAME",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Joining room {}...", app.code),
            Style::default().fg(Color::Yellow),
        )),
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        centered(area, 5),
    );
}

fn render_disconnected(frame: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(Span::styled(
            "NUMBERS GAME",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        centered(area, 7),
    );
}
