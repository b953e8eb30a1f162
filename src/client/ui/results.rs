//! Results screens: one round's scores, and the final standings.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::ui::{centered, format_number, results_lines, standings_lines};

use super::super::state::{ClientApp, ClientPhase};

pub fn render_round(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientPhase::RoundResults(view) = &app.phase else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5), // Correct answer
        Constraint::Min(6),    // Round results
        Constraint::Length(7), // Scoreboard
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    let unit_suffix = if view.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", view.unit)
    };
    let header = vec![
        Line::from(Span::styled(
            format!("Round {} / {}", view.round_index + 1, view.total_rounds),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("The answer was ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}{}", format_number(view.correct_answer), unit_suffix),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(results_lines(&view.results, app.my_id)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Round results ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        ),
        chunks[1],
    );

    // The roster broadcast after each round carries the updated totals.
    let mut standings = app.players.clone();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    frame.render_widget(
        Paragraph::new(standings_lines(&standings, app.my_id)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Scoreboard ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        ),
        chunks[2],
    );

    let hint = if view.is_last_round {
        "Waiting for the host to show final results..."
    } else {
        "Waiting for the host to start the next round..."
    };
    frame.render_widget(
        Paragraph::new(hint).alignment(Alignment::Center).fg(Color::DarkGray),
        chunks[3],
    );
}

pub fn render_final(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientPhase::GameOver { standings } = &app.phase else {
        return;
    };

    let mut content = vec![
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
    content.extend(standings_lines(standings, app.my_id));
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
