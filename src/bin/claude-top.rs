//! claude-top - live terminal monitor for Claude Code usage.
//!
//! Usage:
//!   claude-top                      # interactive dashboard, redrawn every 2s
//!   claude-top --once               # print one frame and exit
//!   claude-top --claude-dir ./.claude --log-file /tmp/claude-top.log -v

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use claude_top::collector::{RealFs, SystemSampler, UsageCollector};
use claude_top::config::{Config, Thresholds, default_data_dir};
use claude_top::provider::LiveSource;
use claude_top::tui::{App, CrosstermEvents, CrosstermPresenter};

/// Panel width used when stdout is not a terminal.
const FALLBACK_COLS: u16 = 80;
/// Rows assumed when a terminal does not report its size.
const FALLBACK_ROWS: u16 = 24;

/// Live terminal monitor for Claude Code usage.
#[derive(Parser)]
#[command(name = "claude-top", about = "Live terminal monitor for Claude Code usage", version)]
struct Args {
    /// Print a single frame and exit.
    #[arg(long)]
    once: bool,

    /// Claude Code data directory (default: $CLAUDE_CONFIG_DIR or ~/.claude).
    #[arg(long, value_name = "PATH")]
    claude_dir: Option<PathBuf>,

    /// Redraw interval in seconds.
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Usage data reload interval in seconds.
    #[arg(long, default_value_t = 30)]
    reload: u64,

    /// Full hours shown before the current one in the hourly chart (0-48).
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=48))]
    hours: u32,

    /// Messages in the last hour above which the pace counts as busy.
    #[arg(long, default_value_t = 40)]
    busy: usize,

    /// Messages in the last hour above which the pace counts as critical.
    #[arg(long, default_value_t = 80)]
    critical: usize,

    /// Path to /proc filesystem (Linux only).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Write logs to this file. Interactive mode logs nothing without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            data_dir: self.claude_dir.clone().unwrap_or_else(default_data_dir),
            tick: Duration::from_secs(self.interval),
            reload_interval: Duration::from_secs(self.reload),
            hours_back: self.hours,
            thresholds: Thresholds {
                busy: self.busy,
                critical: self.critical,
            },
            ..Config::default()
        }
    }
}

/// Initializes the tracing subscriber with the appropriate log level.
///
/// The dashboard owns the terminal, so interactive mode logs only to
/// `log_file`; one-shot mode falls back to stderr.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>, once: bool) -> io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("claude_top={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if once => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Frame size for `--once`.
///
/// Redirected output is not cut to a screen: it gets the fallback width and
/// every row.
fn one_shot_size(stdout_is_terminal: bool) -> (u16, u16) {
    if stdout_is_terminal {
        crossterm::terminal::size().unwrap_or((FALLBACK_COLS, FALLBACK_ROWS))
    } else {
        (FALLBACK_COLS, u16::MAX)
    }
}

#[cfg(target_os = "linux")]
fn system_sampler(proc_path: &str) -> Box<dyn SystemSampler> {
    Box::new(claude_top::collector::ProcfsSampler::new(RealFs::new(), proc_path))
}

#[cfg(not(target_os = "linux"))]
fn system_sampler(_proc_path: &str) -> Box<dyn SystemSampler> {
    Box::new(claude_top::collector::TopSampler::new())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_deref(), args.once) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let config = args.config();
    info!(data_dir = %config.data_dir.display(), "starting claude-top");

    let usage = UsageCollector::from_config(RealFs::new(), &config);
    let source = match LiveSource::new(usage, system_sampler(&args.proc_path)) {
        Ok(source) => source,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let app = App::new(source, config);

    if args.once {
        let (cols, rows) = one_shot_size(io::stdout().is_terminal());
        println!("{}", app.render_once(cols, rows).to_text("\n"));
        return;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        flag.store(true, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let mut app = app.with_interrupt(interrupted);
    let mut events = CrosstermEvents;
    let mut presenter = CrosstermPresenter::stdout();
    if let Err(e) = app.run(&mut events, &mut presenter) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    info!("stopped");
}
