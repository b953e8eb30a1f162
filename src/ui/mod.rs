//! Widgets shared between the host and client TUIs.

mod widgets;

pub use widgets::{
    centered, format_number, overlay_lines, remaining_label, results_lines, standings_lines,
};
