//! Name entry screen.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::centered;

use super::super::state::{ClientApp, ClientPhase};

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientPhase::NameEntry { input, error } = &app.phase else {
        return;
    };

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
        Line::from(Span::styled(
            "Enter your name:",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("{input}_"),
            Style::default().fg(Color::Yellow).bold(),
        )),
    ];
    if let Some(error) = error {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Enter] confirm  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let height = content.len() as u16 + 2;
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        centered(area, height),
    );
}
