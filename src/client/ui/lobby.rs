//! Lobby waiting screen.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::centered;

use super::super::state::ClientApp;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let mut content = vec![
        Line::from(Span::styled(
            "NUMBERS GAME",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Room ", Style::default().fg(Color::White)),
            Span::styled(app.code.clone(), Style::default().fg(Color::Yellow).bold()),
        ]),
        Line::from(""),
    ];

    for player in &app.players {
        let tag = if player.is_host { " [host]" } else { "" };
        let style = if app.is_me(player.id) {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::White)
        };
        content.push(Line::from(Span::styled(
            format!("{}{}", player.name, tag),
            style,
        )));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Waiting for the host to start...",
        Style::default().fg(Color::Yellow),
    )));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Q] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let height = content.len() as u16 + 2;
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        centered(area, height),
    );
}
