//! Line builders for the roster overlay, results tables and standings.

use std::collections::HashSet;
use std::time::Instant;

use ratatui::prelude::*;
use uuid::Uuid;

use crate::protocol::{PlayerEntry, RoundResultEntry};

/// Format a number with thousands separators; fractional guesses keep two
/// decimals.
pub fn format_number(n: f64) -> String {
    let negative = n < 0.0;
    let abs = n.abs();
    let int_part = abs.trunc() as u64;
    let frac = abs.fract();

    let mut digits = int_part.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{tail},{grouped}")
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{digits},{grouped}")
    };

    let sign = if negative { "-" } else { "" };
    if frac > 0.0 {
        format!("{sign}{grouped}.{:02}", (frac * 100.0).round() as u64)
    } else {
        format!("{sign}{grouped}")
    }
}

/// Countdown label for a round deadline, and whether it is urgent.
pub fn remaining_label(deadline_at: Instant) -> (String, bool) {
    let remaining = deadline_at.saturating_duration_since(Instant::now()).as_secs();
    (format!("{remaining}"), remaining <= 10)
}

/// Center a fixed-height band inside `area`.
pub fn centered(area: Rect, height: u16) -> Rect {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);
    chunks[1]
}

/// The "who has answered" overlay: one line per player with a status pip.
pub fn overlay_lines(
    players: &[PlayerEntry],
    answered: &HashSet<Uuid>,
    me: Option<Uuid>,
) -> Vec<Line<'static>> {
    players
        .iter()
        .map(|p| {
            let (pip, pip_style) = if answered.contains(&p.id) {
                ("●", Style::default().fg(Color::Green))
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };

            let name_style = if me == Some(p.id) {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let host_tag = if p.is_host { " [host]" } else { "" };

            Line::from(vec![
                Span::styled(format!(" {pip} "), pip_style),
                Span::styled(format!("{:<18}", format!("{}{}", p.name, host_tag)), name_style),
                Span::styled(format_number(f64::from(p.score)), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}

/// Round results: rank, name, guess and points gained.
pub fn results_lines(results: &[RoundResultEntry], me: Option<Uuid>) -> Vec<Line<'static>> {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let rank_style = if i == 0 {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let name_style = if me == Some(r.id) {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let guess = match r.guess {
                Some(g) => format_number(g),
                None => "No answer".to_string(),
            };

            Line::from(vec![
                Span::styled(format!(" #{:<2} ", i + 1), rank_style),
                Span::styled(format!("{:<18}", r.name), name_style),
                Span::styled(format!("{:>14}", guess), Style::default().fg(Color::Gray)),
                Span::styled(format!("  +{}", r.points), Style::default().fg(Color::Cyan)),
            ])
        })
        .collect()
}

/// Cumulative standings: rank, name and total score.
pub fn standings_lines(standings: &[PlayerEntry], me: Option<Uuid>) -> Vec<Line<'static>> {
    standings
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let rank_style = match i {
                0 => Style::default().fg(Color::Yellow).bold(),
                1 => Style::default().fg(Color::White),
                2 => Style::default().fg(Color::LightRed),
                _ => Style::default().fg(Color::DarkGray),
            };
            let name_style = if me == Some(p.id) {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(format!(" #{:<2} ", i + 1), rank_style),
                Span::styled(format!("{:<18}", p.name), name_style),
                Span::styled(
                    format!("{:>14}", format_number(f64::from(p.score))),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(206.0), "206");
        assert_eq!(format_number(1576.0), "1,576");
        assert_eq!(format_number(14_000_000.0), "14,000,000");
        assert_eq!(format_number(-12742.0), "-12,742");
    }

    #[test]
    fn format_number_keeps_two_decimals_for_fractions() {
        assert_eq!(format_number(12.5), "12.50");
        assert_eq!(format_number(1000.25), "1,000.25");
    }
}
