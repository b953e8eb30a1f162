//! Question screen: prompt, guess input, countdown and the answered overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::ui::{overlay_lines, remaining_label};

use super::super::state::{ClientApp, ClientPhase};

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientPhase::InRound(view) = &app.phase else {
        return;
    };

    let columns = Layout::horizontal([Constraint::Min(40), Constraint::Length(32)])
        .margin(1)
        .split(area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Round label + timer
        Constraint::Length(6), // Question
        Constraint::Length(5), // Guess input
        Constraint::Length(2), // Controls
    ])
    .split(columns[0]);

    let (label, urgent) = remaining_label(view.deadline_at);
    let timer_style = if urgent {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Yellow)
    };
    let header = Line::from(vec![
        Span::styled(
            format!("Round {} / {}", view.round_index + 1, view.total_rounds),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::raw("   "),
        Span::styled(format!("{label}s"), timer_style),
    ]);
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    let mut prompt = vec![Line::from(Span::styled(
        view.prompt.clone(),
        Style::default().fg(Color::White),
    ))];
    if !view.unit.is_empty() {
        prompt.push(Line::from(""));
        prompt.push(Line::from(Span::styled(
            format!("Answer in {}", view.unit),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(prompt).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        ),
        chunks[1],
    );

    let input_lines = if view.submitted {
        vec![Line::from(Span::styled(
            "Answer locked in!",
            Style::default().fg(Color::Green).bold(),
        ))]
    } else {
        let mut lines = vec![Line::from(Span::styled(
            format!("{}_", view.input),
            Style::default().fg(Color::Yellow).bold(),
        ))];
        if let Some(error) = &view.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    };
    frame.render_widget(
        Paragraph::new(input_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Your answer ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        ),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new("Enter to lock in  ·  Esc quit")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray),
        chunks[3],
    );

    let overlay = Paragraph::new(overlay_lines(&app.players, &app.answered, app.my_id)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Players ")
            .title_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(overlay, columns[1]);
}
