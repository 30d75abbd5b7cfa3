//! Tickdo - local todo list with per-item countdown timers.
//!
//! This binary is a thin front over the library's [`TodoStore`] and
//! [`TimerController`]: it maps arguments onto store operations and
//! prints the resulting projections. All state lives in the durable
//! slot under the data directory.
//!
//! # Commands
//!
//! - `tickdo add`: Create a todo item
//! - `tickdo list`: Show the collection in display order
//! - `tickdo done`: Toggle completion for an item
//! - `tickdo rm`: Delete an item
//! - `tickdo edit`: Rename an item
//! - `tickdo stats`: Show aggregate statistics
//! - `tickdo timer`: Run an item's countdown in the foreground
//!
//! # Environment Variables
//!
//! See the [`config`](tickdo::config) module for available options.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tickdo::config::{Config, NotifyMode};
use tickdo::notifier::{BellNotifier, DesktopNotifier, NoopNotifier, Notifier};
use tickdo::storage::FileSlot;
use tickdo::store::TodoStore;
use tickdo::ticker::Ticker;
use tickdo::timer::TimerController;
use tickdo::types::{Category, Priority};
use tickdo::TickdoError;

/// Tickdo - local todo list with per-item countdown timers.
#[derive(Parser, Debug)]
#[command(name = "tickdo")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    TICKDO_DATA_DIR    Data directory (default: ~/.tickdo)
    TICKDO_TICK_MS     Countdown tick interval in ms (default: 1000)
    TICKDO_NOTIFY      Notification mode: desktop, bell, off (default: desktop)

EXAMPLES:
    # Add a high-priority shopping item with a 25 minute timer
    tickdo add \"Buy milk\" --category shopping --priority high --timer 25

    # Show the collection, highest priority first
    tickdo list

    # Run the countdown for item 1 until expiry or Ctrl-C
    tickdo timer 1
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Create a todo item.
    ///
    /// A title that trims to empty is silently ignored, matching the
    /// store's validation design.
    Add {
        /// Display text of the item.
        title: String,

        /// Category: personal, work, shopping, health.
        #[arg(short, long, default_value = "personal")]
        category: String,

        /// Priority: low, medium, high.
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Due timestamp, RFC 3339 (e.g. 2026-09-01T12:00:00Z).
        #[arg(short, long)]
        due: Option<String>,

        /// Countdown duration in minutes.
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        timer: Option<u32>,
    },

    /// Show the collection in display order.
    List,

    /// Toggle completion for an item.
    Done {
        /// Id of the item to toggle.
        id: u64,
    },

    /// Delete an item.
    Rm {
        /// Id of the item to delete.
        id: u64,
    },

    /// Rename an item.
    Edit {
        /// Id of the item to rename.
        id: u64,

        /// New title.
        title: String,
    },

    /// Show aggregate statistics.
    Stats,

    /// Run an item's countdown in the foreground until expiry or Ctrl-C.
    Timer {
        /// Id of the item whose configured duration to count down.
        id: u64,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    debug!(
        data_dir = %config.data_dir.display(),
        tick_ms = config.tick_ms,
        "Configuration loaded"
    );

    let notifier = make_notifier(config.notify);
    let slot = FileSlot::new(config.data_dir.clone());
    let mut store = TodoStore::load(Box::new(slot), notifier.clone());

    match cli.command {
        Command::Add {
            title,
            category,
            priority,
            due,
            timer,
        } => run_add(&mut store, &title, &category, &priority, due.as_deref(), timer),
        Command::List => {
            run_list(&store);
            Ok(())
        }
        Command::Done { id } => {
            store.toggle_completed(id).map_err(TickdoError::from)?;
            run_list(&store);
            Ok(())
        }
        Command::Rm { id } => {
            store.delete(id).map_err(TickdoError::from)?;
            run_list(&store);
            Ok(())
        }
        Command::Edit { id, title } => {
            store.begin_edit(id);
            store.change_edited_title(id, &title);
            store.commit_edit(id).map_err(TickdoError::from)?;
            run_list(&store);
            Ok(())
        }
        Command::Stats => {
            run_stats(&store);
            Ok(())
        }
        Command::Timer { id } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to create tokio runtime")?;

            runtime.block_on(run_timer(&store, notifier, id, config.tick_ms))
        }
    }
}

/// Creates the configured notification capability.
fn make_notifier(mode: NotifyMode) -> Arc<dyn Notifier> {
    match mode {
        NotifyMode::Desktop => Arc::new(DesktopNotifier),
        NotifyMode::Bell => Arc::new(BellNotifier),
        NotifyMode::Off => Arc::new(NoopNotifier),
    }
}

/// Handles the `add` subcommand.
fn run_add(
    store: &mut TodoStore,
    title: &str,
    category: &str,
    priority: &str,
    due: Option<&str>,
    timer: Option<u32>,
) -> Result<()> {
    let category: Category = category.parse().map_err(TickdoError::from)?;
    let priority: Priority = priority.parse().map_err(TickdoError::from)?;
    let due_date = due.map(parse_due_date).transpose()?;

    match store
        .add(title, category, priority, due_date, timer)
        .map_err(TickdoError::from)?
    {
        Some(id) => {
            info!(id, "Todo created");
            println!("Added todo {id}: {}", title.trim());
        }
        None => eprintln!("Ignored: title is empty"),
    }
    Ok(())
}

/// Parses an RFC 3339 due date into UTC.
fn parse_due_date(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            TickdoError::InvalidDueDate {
                value: value.to_string(),
            }
            .into()
        })
}

/// Prints the collection in display order.
fn run_list(store: &TodoStore) {
    if store.is_empty() {
        println!("No todos.");
        return;
    }

    for item in store.sorted_view() {
        let mark = if item.completed { "x" } else { " " };
        let due = item
            .due_date
            .map(|d| format!(" due {}", d.format("%Y-%m-%d %H:%M")))
            .unwrap_or_default();
        let timer = item
            .timer_duration
            .map(|m| format!(" [{m}m]"))
            .unwrap_or_default();
        println!(
            "[{mark}] {:>3}  {:<8} {:<8} {}{due}{timer}",
            item.id, item.priority, item.category, item.title
        );
    }
}

/// Prints aggregate statistics.
fn run_stats(store: &TodoStore) {
    let stats = store.statistics();
    println!("completed: {}", stats.completed);
    println!("pending:   {}", stats.pending);
    println!("streaks:   {}", stats.streaks);
    println!("pomodoros: {}", stats.pomodoros);
}

/// Runs the countdown for one item until expiry or Ctrl-C.
async fn run_timer(
    store: &TodoStore,
    notifier: Arc<dyn Notifier>,
    id: u64,
    tick_ms: u64,
) -> Result<()> {
    let Some(item) = store.get(id) else {
        eprintln!("No todo with id {id}");
        return Ok(());
    };
    let Some(minutes) = item.timer_duration else {
        eprintln!("Todo {id} has no timer duration");
        return Ok(());
    };

    let mut timer = TimerController::new(notifier);
    timer.start(item);
    info!(id, minutes, "Countdown running");

    let (tick_tx, mut tick_rx) = mpsc::channel(4);
    let ticker = Ticker::spawn(Duration::from_millis(tick_ms), tick_tx);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                timer.cancel();
                println!("\nCancelled.");
                break;
            }
            tick = tick_rx.recv() => {
                if tick.is_none() {
                    break;
                }
                timer.tick();
                match timer.remaining_secs() {
                    Some(remaining) => {
                        print!("\r{:02}:{:02}", remaining / 60, remaining % 60);
                        use std::io::Write;
                        let _ = std::io::stdout().flush();
                    }
                    None => {
                        println!("\nTime's up: {}", item.title);
                        break;
                    }
                }
            }
        }
    }

    ticker.cancel();
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// Uses the `RUST_LOG` environment variable to configure log levels,
/// defaulting to `warn` so command output stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
