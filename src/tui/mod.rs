mod bars;
mod help;
mod state;

use crate::cli::{build_config, Cli};
use crate::model::{describe_algorithm, AlgorithmKind};
use crate::orchestrator::{self, RunController, UiCommand, VisualEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Terminal,
};
use state::{UiState, MAX_SIZE};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let mut ctl = RunController::new(&cfg).context("failed to prepare the sequence")?;
    if cfg.auto_on_launch {
        ctl.start_auto();
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel::<VisualEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // Terminal I/O blocks, so the render loop gets its own OS thread.
    let interval = ctl.interval();
    let ui_handle = std::thread::spawn(move || run_threaded(interval, event_rx, cmd_tx));

    let res = orchestrator::drive(ctl, event_tx, cmd_rx).await.map(|_| ());

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Map a key press to a driver command. Keys that only touch the UI return `None`.
fn command_for_key(state: &mut UiState, modifiers: KeyModifiers, code: KeyCode) -> Option<UiCommand> {
    match (modifiers, code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            Some(UiCommand::Quit)
        }
        (_, KeyCode::Char(' ')) | (_, KeyCode::Char('n')) => Some(UiCommand::Step),
        (_, KeyCode::Char('a')) => Some(UiCommand::ToggleAuto),
        (_, KeyCode::Char('r')) => {
            state.info = "Reset".into();
            Some(UiCommand::Reset)
        }
        (_, KeyCode::Char('g')) => {
            state.info = format!("Generated {} values", state.size());
            Some(UiCommand::Generate)
        }
        (_, KeyCode::Char('o')) => {
            state.info = "Restored original array".into();
            Some(UiCommand::RestoreOriginal)
        }
        (_, KeyCode::Char(c @ '1'..='5')) => {
            let idx = (c as usize) - ('1' as usize);
            Some(UiCommand::Select(AlgorithmKind::ALL[idx]))
        }
        (_, KeyCode::Left) => Some(UiCommand::Select(state.algorithm.prev())),
        (_, KeyCode::Right) => Some(UiCommand::Select(state.algorithm.next())),
        (_, KeyCode::Char('+')) | (_, KeyCode::Char('=')) => {
            let size = (state.size() + 1).min(MAX_SIZE);
            state.info = format!("Size: {size}");
            Some(UiCommand::Resize(size))
        }
        (_, KeyCode::Char('-')) => {
            let size = state.size().saturating_sub(1).max(1);
            state.info = format!("Size: {size}");
            Some(UiCommand::Resize(size))
        }
        (_, KeyCode::Tab) => {
            state.tab = (state.tab + 1) % 2;
            None
        }
        (_, KeyCode::Char('?')) => {
            state.tab = 1;
            None
        }
        _ => None,
    }
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    interval: Duration,
    mut event_rx: UnboundedReceiver<VisualEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState {
        interval,
        ..Default::default()
    };

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    let res = loop {
        // Apply every frame the driver produced since the last pass.
        while let Ok(ev) = event_rx.try_recv() {
            state.apply_event(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = command_for_key(&mut state, k.modifiers, k.code) {
                    let quit = cmd == UiCommand::Quit;
                    let _ = cmd_tx.send(cmd);
                    if quit {
                        break Ok(());
                    }
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Visualizer"), Line::from("Help")])
        .select(state.tab)
        .block(Block::default().borders(Borders::ALL).title("sortstep"))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_visualizer(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
}

fn draw_visualizer(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(8),    // Bars
                Constraint::Length(7), // Algorithm description + counters (side-by-side)
                Constraint::Length(3), // Status row
            ]
            .as_ref(),
        )
        .split(area);

    bars::draw_bars(main[0], f, state);

    let info_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(main[1]);

    let info = describe_algorithm(state.algorithm);
    let algo_tabs: Vec<Span> = AlgorithmKind::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, k)| {
            let style = if *k == state.algorithm {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!("{} {}", i + 1, k.as_str()), style),
                Span::raw("  "),
            ]
        })
        .collect();
    let description = Paragraph::new(vec![
        Line::from(algo_tabs),
        Line::from(vec![
            Span::styled(format!("{}: ", info.title), Style::default().fg(Color::Cyan)),
            Span::raw(info.description),
        ]),
        Line::from(vec![
            Span::styled("Complexity: ", Style::default().fg(Color::Gray)),
            Span::styled(info.complexity, Style::default().fg(Color::Magenta)),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Algorithm"));
    f.render_widget(description, info_row[0]);

    let counters = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Comparisons: ", Style::default().fg(Color::Gray)),
            Span::raw(state.comparisons.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Swaps: ", Style::default().fg(Color::Gray)),
            Span::raw(state.swaps.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Steps: ", Style::default().fg(Color::Gray)),
            Span::raw(state.steps.to_string()),
            Span::raw("   "),
            Span::styled("Done: ", Style::default().fg(Color::Gray)),
            Span::raw(if state.done { "yes" } else { "no" }),
        ]),
        Line::from(vec![
            Span::styled("Auto: ", Style::default().fg(Color::Gray)),
            Span::styled(
                if state.auto { "on" } else { "off" },
                Style::default().fg(if state.auto { Color::Green } else { Color::Gray }),
            ),
            Span::raw(format!(" (every {})", humantime::format_duration(state.interval))),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Counters"));
    f.render_widget(counters, info_row[1]);

    let status = Paragraph::new(Line::from(vec![
        Span::styled("Info: ", Style::default().fg(Color::Gray)),
        Span::raw(state.info.as_str()),
        Span::raw("   "),
        Span::styled(
            "space step | a auto | r reset | g new | o original | 1-5 algo | ? help | q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, main[2]);
}
