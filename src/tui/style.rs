//! Color constants for the TUI.

use ratatui::style::Color;

use crate::jobs::{JobStatus, Urgency};

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Slider fill color.
pub const SLIDER: Color = Color::Blue;
/// Grid panel border outside the crisis hour.
pub const CALM: Color = Color::Green;
/// Grid panel border and alert banner during the crisis hour.
pub const PEAK: Color = Color::Red;
/// Price figure color.
pub const PRICE: Color = Color::Yellow;
/// Highlighted table row background.
pub const SELECTED_BG: Color = Color::DarkGray;

/// Badge color for a job status; only running jobs stand out.
pub fn status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Running => Color::Green,
        JobStatus::Paused | JobStatus::Completed | JobStatus::Migrated => Color::Gray,
    }
}

/// Badge color for a job urgency.
pub fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::High => Color::LightRed,
        Urgency::Low => Color::LightBlue,
    }
}
