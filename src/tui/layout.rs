//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table};

use super::runtime::App;
use super::style;
use crate::grid::HOURS_PER_DAY;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let banner_height = if app.grid.is_peak { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // header
            Constraint::Length(3),             // hour slider
            Constraint::Length(4),             // grid stats
            Constraint::Length(banner_height), // peak alert
            Constraint::Min(6),                // jobs table
            Constraint::Length(1),             // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_slider(frame, app, chunks[1]);
    render_grid(frame, app, chunks[2]);
    if app.grid.is_peak {
        render_alert(frame, chunks[3]);
    }
    render_jobs(frame, app, chunks[4]);
    render_footer(frame, app, chunks[5]);
}

/// Header bar: title, time of day, London running draw.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " ECO-COMPUTE ARBITRAGEUR ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{:02}:00", app.hour),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ London running draw: {} kW ",
            app.london_running_kw()
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Time-of-day slider.
fn render_slider(frame: &mut Frame, app: &App, area: Rect) {
    let ratio = f64::from(app.hour) / f64::from(HOURS_PER_DAY - 1);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Simulation Time  00:00 … 23:00 ")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::SLIDER))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:02}:00", app.hour));
    frame.render_widget(gauge, area);
}

/// Load, price, and carbon panel; red border at the peak hour.
fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let g = &app.grid;
    let border = if g.is_peak { style::PEAK } else { style::CALM };
    let lines = vec![
        Line::from(vec![
            Span::raw("  Grid Load: "),
            Span::styled(
                format!("{} MW", g.grid_load_mw),
                Style::default().fg(border).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Price / MWh: "),
            Span::styled(
                format!("£{:.2}", g.price_per_mwh),
                Style::default()
                    .fg(style::PRICE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Carbon Intensity: "),
            Span::styled(
                format!("{} g/kWh", g.carbon_intensity),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    let block = Block::default()
        .title(" Grid ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Stress banner shown only at the crisis hour.
fn render_alert(frame: &mut Frame, area: Rect) {
    let alert = Paragraph::new(Line::from(Span::styled(
        " ⚠ GRID STRESS EVENT DETECTED: High Prices & Carbon Intensity!",
        Style::default()
            .fg(style::HEADER_FG)
            .bg(style::PEAK)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(alert, area);
}

/// Active workloads table with the selection cursor.
fn render_jobs(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Job ID", "Type", "Power", "Urgency", "Status", "Location"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.jobs.iter().enumerate().map(|(i, job)| {
        let row = Row::new(vec![
            Cell::from(job.id.as_str()),
            Cell::from(job.job_type.as_str()),
            Cell::from(format!("{} kW", job.power_consumption_kw)),
            Cell::from(job.urgency.as_str())
                .style(Style::default().fg(style::urgency_color(job.urgency))),
            Cell::from(job.status.as_str())
                .style(Style::default().fg(style::status_color(job.status))),
            Cell::from(job.location.as_str()),
        ]);
        if i == app.selected {
            row.style(Style::default().bg(style::SELECTED_BG))
        } else {
            row
        }
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(22),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Active Workloads ")
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);
}

/// Footer: last action result or keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.message.clone().unwrap_or_else(|| {
        " q:Quit  ←/→:Hour  ↑/↓:Select  p:Pause  s:Resume  c:Complete  m:Iceland  l:London  r:Reset"
            .to_string()
    });
    let footer = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
