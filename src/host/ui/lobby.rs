//! Host lobby: room code, roster, and the host's own name entry.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::ui::centered;

use super::super::host::HostApp;

pub fn render(frame: &mut Frame, area: Rect, app: &HostApp) {
    let host_named = app
        .session
        .participant(app.session.host_id())
        .is_some_and(|p| p.name.is_some());

    let players = app.session.player_entries();

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "NUMBERS GAME",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Room code: ", Style::default().fg(Color::White)),
            Span::styled(
                app.session.code().to_string(),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
        Line::from(""),
    ];

    if host_named {
        for entry in &players {
            let tag = if entry.is_host { " [host]" } else { "" };
            content.push(Line::from(Span::styled(
                format!("{}{}", entry.name, tag),
                Style::default().fg(Color::White),
            )));
        }
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "[Enter] start the game",
            Style::default().fg(Color::Green),
        )));
    } else {
        content.push(Line::from(Span::styled(
            "Enter your name:",
            Style::default().fg(Color::White),
        )));
        content.push(Line::from(Span::styled(
            format!("{}_", app.input),
            Style::default().fg(Color::Yellow).bold(),
        )));
    }

    if let Some(error) = &app.input_error {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let height = content.len() as u16 + 2;
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::NONE)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, centered(area, height));
}
