use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(action),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("space", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("n", Style::default().fg(Color::Magenta)),
            Span::raw("   Step once"),
        ]),
        key_line("a", 11, "Toggle auto mode"),
        key_line("r", 11, "Reset the run (keeps the current values)"),
        key_line("g", 11, "Generate a new random array"),
        key_line("o", 11, "Restore the original array"),
        key_line("+/-", 9, "Grow/shrink the array and regenerate"),
        Line::from(""),
        Line::from("Algorithm:"),
        key_line("1-5", 9, "Bubble, Insertion, Selection, Merge, Quick"),
        key_line("←/→", 9, "Previous/next algorithm"),
        Line::from(""),
        Line::from("Other:"),
        key_line("tab", 9, "Switch tabs"),
        key_line("?", 11, "Show this help"),
        Line::from(""),
        Line::from("Bars:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("yellow", Style::default().fg(Color::Yellow)),
            Span::raw("      Being compared or moved"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("green", Style::default().fg(Color::Green)),
            Span::raw("       Settled"),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
