use crate::model::{AlgorithmKind, RunConfig};
use crate::orchestrator::{run_to_completion, RunController};
use crate::text_summary::{build_text_summary, summarize, StepPrinter};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Blocking writer task that owns stdout and stderr for the whole run.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "sortstep",
    version,
    about = "Step-through sorting algorithm visualizer with optional TUI"
)]
pub struct Cli {
    /// Algorithm to run
    #[arg(long, value_enum, default_value_t = AlgorithmKind::Bubble)]
    pub algorithm: AlgorithmKind,

    /// Number of random values to generate
    #[arg(long, default_value_t = 20)]
    pub size: usize,

    /// Smallest generated value
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub min: i32,

    /// Largest generated value
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub max: i32,

    /// Sort these values instead of a random sequence (e.g. 4,2,3,1)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub values: Option<Vec<i32>>,

    /// Seed for reproducible random sequences
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between steps in auto mode
    #[arg(long, default_value = "200ms")]
    pub interval: humantime::Duration,

    /// Start auto mode as soon as the TUI opens
    #[arg(long)]
    pub auto: bool,

    /// Run to completion printing one line per step, then a summary (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Run to completion and print a JSON summary (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Append logs to this file
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.text || self.json || cfg!(not(feature = "tui"))
    }
}

/// Build a `RunConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> RunConfig {
    RunConfig {
        algorithm: args.algorithm,
        size: args.size,
        min: args.min,
        max: args.max,
        seed: args.seed,
        values: args.values.clone(),
        interval: Duration::from(args.interval),
        auto_on_launch: args.auto,
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.text && args.json {
        return Err(anyhow::anyhow!(
            "--text and --json are mutually exclusive. Pick one output mode."
        ));
    }
    if args.min > args.max {
        return Err(anyhow::anyhow!(
            "--min ({}) must not be greater than --max ({})",
            args.min,
            args.max
        ));
    }
    if args.interval.is_zero() {
        return Err(anyhow::anyhow!("--interval must be greater than zero"));
    }

    crate::logging::init(args.log_file.as_deref(), args.is_headless())?;

    if args.json {
        return run_json(args).await;
    }

    if !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            return run_text(args).await;
        }
    }

    run_text(args).await
}

fn build_controller(cfg: &RunConfig) -> Result<RunController> {
    RunController::new(cfg).context("failed to prepare the sequence")
}

async fn run_json(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let mut ctl = build_controller(&cfg)?;
    run_to_completion(&mut ctl, &mut StepPrinter::new(|_| {}))?;

    let summary = summarize(&ctl, &cfg);
    let (out_tx, out_handle) = spawn_output_writer();
    let out = serde_json::to_string_pretty(&summary)?;
    let _ = out_tx.send(OutputLine::Stdout(out));
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

async fn run_text(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let mut ctl = build_controller(&cfg)?;
    let (out_tx, out_handle) = spawn_output_writer();

    let _ = out_tx.send(OutputLine::Stderr(format!(
        "== {} on {} values ==",
        ctl.kind().as_str(),
        ctl.values().len()
    )));
    {
        let tx = out_tx.clone();
        let mut printer = StepPrinter::new(move |line| {
            let _ = tx.send(OutputLine::Stdout(line));
        });
        run_to_completion(&mut ctl, &mut printer)?;
    }

    let summary = build_text_summary(&summarize(&ctl, &cfg));
    for line in summary.lines {
        let _ = out_tx.send(OutputLine::Stdout(line));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}
