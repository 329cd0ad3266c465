//! dashkit - terminal admin dashboard.
//!
//! Usage:
//!   dashkit                                 # open the overview
//!   dashkit --route /dashboard/users        # start on the users table
//!   dashkit -c dashboard.toml --page-size 25
//!   dashkit --log-file dashkit.log -vv      # trace logging to a file

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use dashkit::config::Config;
use dashkit::tui::App;

/// Clock refresh interval.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Terminal admin dashboard.
#[derive(Parser)]
#[command(name = "dashkit", version, about = "Terminal admin dashboard")]
struct Args {
    /// Configuration file (TOML). The built-in configuration is used when omitted.
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Route to open on start.
    #[arg(short = 'r', long, default_value = "/dashboard")]
    route: String,

    /// Rows per grid page. Overrides `[grid] page_size`.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    page_size: Option<u16>,

    /// Write logs to this file. Without it logging is disabled, since the
    /// terminal belongs to the dashboard.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(path: &Path, verbose: u8, quiet: bool) -> std::io::Result<()> {
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
    if let Ok(directive) = format!("dashkit={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file
        && let Err(e) = init_logging(path, args.verbose, args.quiet)
    {
        eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
        std::process::exit(1);
    }

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(page_size) = args.page_size {
        config.grid.page_size = usize::from(page_size);
    }

    if !args.route.starts_with('/') {
        eprintln!("Error: route must start with '/': {}", args.route);
        std::process::exit(1);
    }

    tracing::info!("dashkit {} starting", env!("CARGO_PKG_VERSION"));

    let app = match App::new(&config, &args.route) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run(TICK_RATE) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
