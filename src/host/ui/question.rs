//! Host question screen: prompt, answer input, countdown and the answered
//! overlay.

use std::collections::HashSet;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::ui::{overlay_lines, remaining_label};

use super::super::host::HostApp;

pub fn render(frame: &mut Frame, area: Rect, app: &HostApp) {
    let Some(round) = app.session.current_round() else {
        return;
    };
    let host_id = app.session.host_id();

    let columns = Layout::horizontal([Constraint::Min(40), Constraint::Length(32)])
        .margin(1)
        .split(area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Round label + timer
        Constraint::Length(6), // Question
        Constraint::Length(5), // Answer input
        Constraint::Length(2), // Controls
    ])
    .split(columns[0]);

    render_header(frame, chunks[0], app, round.index());
    render_prompt(frame, chunks[1], &round.question().prompt, &round.question().unit);
    render_answer_input(frame, chunks[2], app, round.has_submitted(host_id));

    let controls = Paragraph::new("Enter to lock in  ·  Esc quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);

    render_overlay(frame, columns[1], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &HostApp, round_index: usize) {
    let mut spans = vec![Span::styled(
        format!("Round {} / {}", round_index + 1, app.session.total_rounds()),
        Style::default().fg(Color::Cyan).bold(),
    )];
    if let Some(deadline_at) = app.session.round_deadline_at() {
        let (label, urgent) = remaining_label(deadline_at);
        let style = if urgent {
            Style::default().fg(Color::Red).bold()
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(format!("{label}s"), style));
    }

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str, unit: &str) {
    let mut lines = vec![Line::from(Span::styled(
        prompt.to_string(),
        Style::default().fg(Color::White),
    ))];
    if !unit.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Answer in {unit}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_answer_input(frame: &mut Frame, area: Rect, app: &HostApp, submitted: bool) {
    let lines = if submitted {
        vec![Line::from(Span::styled(
            "Answer locked in!",
            Style::default().fg(Color::Green).bold(),
        ))]
    } else {
        let mut lines = vec![Line::from(Span::styled(
            format!("{}_", app.input),
            Style::default().fg(Color::Yellow).bold(),
        ))];
        if let Some(error) = &app.input_error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Your answer ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_overlay(frame: &mut Frame, area: Rect, app: &HostApp) {
    let answered: HashSet<_> = app
        .session
        .current_round()
        .map(|r| r.answered_ids().into_iter().collect())
        .unwrap_or_default();
    let players = app.session.player_entries();
    let lines = overlay_lines(&players, &answered, Some(app.session.host_id()));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Players ")
            .title_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(widget, area);
}
