use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    style::Style,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use super::state::UiState;
use crate::model::describe_algorithm;

/// Color for the bar at `idx`: active wins over settled.
pub fn bar_color(state: &UiState, idx: usize) -> Color {
    if state.active.contains(&idx) {
        Color::Yellow
    } else if state.settled.contains(&idx) {
        Color::Green
    } else {
        Color::Gray
    }
}

/// Bar heights are shifted so the smallest value still has a visible bar.
fn bar_floor(values: &[i32]) -> i64 {
    values.iter().copied().min().map_or(0, |m| i64::from(m.min(1)) - 1)
}

pub fn draw_bars(area: Rect, f: &mut Frame, state: &UiState) {
    let info = describe_algorithm(state.algorithm);
    let title = format!("{} ({} values)", info.title, state.values.len());

    if state.values.is_empty() {
        let empty = Paragraph::new("No array yet. Press g to generate one.")
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let floor = bar_floor(&state.values);
    let max_height = state
        .values
        .iter()
        .map(|v| (i64::from(*v) - floor) as u64)
        .max()
        .unwrap_or(1);

    // Split into Y-axis labels and chart
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(6), Constraint::Min(0)].as_ref())
        .split(area);

    let num_bars = state.values.len();
    let chart_width = layout[1].width.saturating_sub(2) as usize;
    let slot = (chart_width / num_bars).max(1);
    let (bar_width, bar_gap) = if slot >= 3 {
        ((slot - 1) as u16, 1)
    } else {
        (slot as u16, 0)
    };

    let bars: Vec<Bar> = state
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let bar = Bar::default()
                .value((i64::from(*v) - floor) as u64)
                .style(Style::default().fg(bar_color(state, i)));
            // Numbers only fit on reasonably wide bars.
            if bar_width >= 3 {
                bar.text_value(v.to_string())
            } else {
                bar.text_value(String::new())
            }
        })
        .collect();

    // Y-axis labels - offset by 1 at top/bottom to align with chart's inner area
    let label_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // border offset
            Constraint::Length(1), // max
            Constraint::Min(0),    // spacer
            Constraint::Length(1), // min
            Constraint::Length(1), // border offset
        ])
        .split(layout[0]);

    let max_val = state.values.iter().copied().max().unwrap_or(0);
    let min_val = state.values.iter().copied().min().unwrap_or(0);
    f.render_widget(
        Paragraph::new(format!("{:>5}", max_val)).style(Style::default().fg(Color::Gray)),
        label_layout[1],
    );
    f.render_widget(
        Paragraph::new(format!("{:>5}", min_val)).style(Style::default().fg(Color::Gray)),
        label_layout[3],
    );

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(max_height);

    f.render_widget(chart, layout[1]);
}
