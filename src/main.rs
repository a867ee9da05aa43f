// listtrace: step-through linked-list memory visualizer for Java snippets

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::json;
use tracing::{info, warn, Level};

use listtrace::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
use listtrace::interpreter::{find_head, heap_layout, replay, ChainLink};
use listtrace::parser::{recognize, Recognition};
use listtrace::telemetry::{init_tracing, LogSink};
use listtrace::ui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DumpFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "listtrace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Step through Java linked-list code and watch the stack and heap", long_about = None)]
struct Cli {
    /// Java source file to visualize
    file: PathBuf,

    /// Step to show when the UI opens (0 = before the first step)
    #[arg(long, default_value_t = 0)]
    step: usize,

    /// Milliseconds between steps in play mode
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Byte budget for cached snapshots; later steps are replayed on demand
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_LIMIT)]
    snapshot_limit: usize,

    /// Print steps, errors and the final memory state instead of opening the UI
    #[arg(long, value_enum)]
    dump: Option<DumpFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json_logs: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let sink = match &cli.log_file {
        Some(path) => LogSink::File(
            File::create(path)
                .with_context(|| format!("Failed to create log file '{}'", path.display()))?,
        ),
        None => LogSink::Stderr,
    };
    // Keep the alternate screen clean unless logs have somewhere else to go
    let screen_owned = cli.dump.is_none() && cli.log_file.is_none();
    let level = match (cli.verbose, screen_owned) {
        (_, true) => Level::WARN,
        (true, false) => Level::DEBUG,
        (false, false) => Level::INFO,
    };
    let ceiling = screen_owned.then_some(Level::WARN);
    init_tracing(cli.json_logs, level, sink, ceiling);

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read '{}'", cli.file.display()))?;

    info!(file = %cli.file.display(), "recognizing source");
    let recognition = recognize(&source);
    info!(
        steps = recognition.steps.len(),
        errors = recognition.errors.len(),
        "recognition complete"
    );
    if recognition.has_errors() {
        warn!(
            first = %recognition.errors[0],
            "some lines were not recognized and will be skipped"
        );
    }

    if let Some(format) = cli.dump {
        return dump(&recognition, format);
    }

    let mut app = App::from_recognition(
        recognition,
        source,
        cli.snapshot_limit,
        Duration::from_millis(cli.interval_ms),
    );
    if let Err(e) = app.timeline.seek(cli.step) {
        warn!(error = %e, "ignoring --step");
    }

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("UI event loop failed")
}

/// Print the recognition result and final snapshot
fn dump(recognition: &Recognition, format: DumpFormat) -> Result<()> {
    let last = recognition.steps.len() as isize - 1;
    let state = replay(&recognition.steps, last);

    match format {
        DumpFormat::Json => {
            let steps: Vec<_> = recognition
                .steps
                .iter()
                .map(|step| json!({ "step": step, "description": step.description() }))
                .collect();
            let output = json!({
                "steps": steps,
                "errors": recognition.errors,
                "snapshot": state,
                "head": find_head(&state),
                "chains": heap_layout(&state),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        DumpFormat::Text => {
            println!("Steps:");
            for step in &recognition.steps {
                println!("  {:4}  {}", step.line + 1, step.description());
            }
            if !recognition.errors.is_empty() {
                println!("Errors:");
                for err in &recognition.errors {
                    println!("  {}", err);
                }
            }
            println!("Stack:");
            for (name, addr) in state.stack.iter() {
                match addr {
                    Some(addr) => println!("  {} -> {}", name, addr),
                    None => println!("  {} -> null", name),
                }
            }
            println!("Heap:");
            for chain in heap_layout(&state) {
                let links: Vec<String> = chain
                    .iter()
                    .map(|link| match *link {
                        ChainLink::Node(addr) => {
                            let value = state.heap.get(addr).map(|n| n.value).unwrap_or_default();
                            format!("{}[{}]", addr, value)
                        }
                        ChainLink::Cycle(addr) => format!("cycle to {}", addr),
                        ChainLink::Joins(addr) => format!("joins {}", addr),
                    })
                    .collect();
                println!("  {}", links.join(" -> "));
            }
        }
    }

    Ok(())
}
