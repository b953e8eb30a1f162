//! Host results screens: one round's scores, and the final standings.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::ui::{centered, format_number, results_lines, standings_lines};

use super::super::host::HostApp;

pub fn render_round(frame: &mut Frame, area: Rect, app: &HostApp) {
    let Some(outcome) = app.session.last_outcome() else {
        return;
    };
    let me = Some(app.session.host_id());

    let chunks = Layout::vertical([
        Constraint::Length(5),  // Correct answer
        Constraint::Min(6),     // Round results
        Constraint::Length(7),  // Scoreboard
        Constraint::Length(2),  // Controls
    ])
    .margin(1)
    .split(area);

    let unit_suffix = if outcome.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", outcome.unit)
    };
    let header = vec![
        Line::from(Span::styled(
            format!("Round {} / {}", outcome.round_index + 1, app.session.total_rounds()),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("The answer was ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}{}", format_number(outcome.correct_answer), unit_suffix),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    let results = Paragraph::new(results_lines(&outcome.results, me)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Round results ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(results, chunks[1]);

    let scoreboard = Paragraph::new(standings_lines(&app.session.final_standings(), me)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Scoreboard ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(scoreboard, chunks[2]);

    let hint = if outcome.is_last_round {
        "[Enter] see final results  ·  Esc quit"
    } else {
        "[Enter] next round  ·  Esc quit"
    };
    frame.render_widget(
        Paragraph::new(hint).alignment(Alignment::Center).fg(Color::DarkGray),
        chunks[3],
    );
}

pub fn render_final(frame: &mut Frame, area: Rect, app: &HostApp) {
    let standings = app.session.final_standings();
    let me = Some(app.session.host_id());

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];
    if let Some(winner) = standings.first() {
        content.push(Line::from(Span::styled(
            format!("{} wins!", winner.name),
            Style::default().fg(Color::Yellow).bold(),
        )));
        content.push(Line::from(""));
    }
    content.extend(standings_lines(&standings, me));
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
