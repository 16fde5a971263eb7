use std::fmt;

use clap::{Parser, Subcommand};
use services::{AppServices, Clock, DailyLimit, TrackerConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracker_core::stats::{format_duration_compact, format_duration_long};
use tracker_core::streak::DEFAULT_STREAK_LOOKBACK_DAYS;

mod render;

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
    EmptyDuration,
    ClearNotConfirmed,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::EmptyDuration => f.write_str("log requires --minutes and/or --hours"),
            ArgsError::ClearNotConfirmed => {
                f.write_str("clear deletes every session; rerun with --yes to confirm")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Parser)]
#[command(name = "qep-tracker")]
#[command(about = "Log training sessions and follow progress through the program grid", long_about = None)]
struct Cli {
    /// SQLite database URL or path
    #[arg(long, global = true, env = "TRACKER_DB_URL", default_value = "sqlite:tracker.sqlite3")]
    db: String,

    /// Days checked when counting the current streak
    #[arg(long, global = true, env = "TRACKER_STREAK_LOOKBACK", default_value_t = DEFAULT_STREAK_LOOKBACK_DAYS)]
    lookback_days: u32,

    /// Most minutes that may be logged on one day
    #[arg(long, global = true, env = "TRACKER_DAILY_LIMIT", default_value_t = DailyLimit::DEFAULT_MINUTES)]
    daily_limit_minutes: u32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show hours, stage, streak and session stats (default)
    Status {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw the progress grid
    Grid {
        /// Draw every row instead of the preview window
        #[arg(long)]
        full: bool,
    },
    /// Log a new session
    Log {
        #[arg(long, default_value_t = 0)]
        minutes: u32,
        #[arg(long, default_value_t = 0)]
        hours: u32,
        /// Session day, "Month D, YYYY" or YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List logged sessions, most recent first
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Replace all data with three demo sessions
    SeedDemo,
    /// Delete all sessions and reset the hour total
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Show or change app settings
    Settings {
        #[arg(long)]
        constrained_view: Option<bool>,
    },
}

fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_string();
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.db.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: cli.db }.into());
    }
    let db_url = normalize_sqlite_url(&cli.db);
    debug!(%db_url, "opening database");

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let config = TrackerConfig {
        daily_limit: DailyLimit::new(cli.daily_limit_minutes),
        streak_lookback_days: cli.lookback_days,
    };
    let services = AppServices::new_sqlite(&db_url, Clock::default_clock(), config).await?;
    let tracker = services.tracker();

    match cli.command.unwrap_or(Command::Status { json: false }) {
        Command::Status { json } => {
            let dashboard = tracker.load_dashboard().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                let settings = services.settings().load().await?;
                print!("{}", render::dashboard(&dashboard, settings));
            }
        }
        Command::Grid { full } => {
            let log = tracker.load().await?;
            let window = if full {
                None
            } else {
                tracker.dashboard(&log).preview
            };
            print!("{}", render::grid(log.cumulative_hours, window));
        }
        Command::Log {
            minutes,
            hours,
            date,
        } => {
            let total = hours.saturating_mul(60).saturating_add(minutes);
            if total == 0 {
                return Err(ArgsError::EmptyDuration.into());
            }
            let record = match date {
                Some(raw) => tracker.log_session_on(&raw, total).await?,
                None => tracker.log_session_today(total).await?,
            };
            println!(
                "Logged {} on {}",
                format_duration_compact(u64::from(record.duration_minutes())),
                record.date()
            );
            let remaining = tracker.remaining_minutes_on(record.date()).await?;
            println!(
                "{} left on {}",
                format_duration_compact(remaining),
                record.date()
            );
        }
        Command::History { limit } => {
            let log = tracker.load().await?;
            if log.sessions.is_empty() {
                println!("No sessions recorded yet.");
            }
            for session in log.sessions.iter().take(limit) {
                println!(
                    "{:<20} {:>12}",
                    session.date().to_string(),
                    format_duration_long(u64::from(session.duration_minutes()))
                );
            }
        }
        Command::SeedDemo => {
            let seeded = tracker.seed_demo().await?;
            println!("Seeded {} demo sessions", seeded.len());
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(ArgsError::ClearNotConfirmed.into());
            }
            tracker.clear().await?;
            println!("All data has been cleared");
        }
        Command::Settings { constrained_view } => {
            let settings = match constrained_view {
                Some(enabled) => services.settings().set_constrained_view(enabled).await?,
                None => services.settings().load().await?,
            };
            println!("constrained view: {}", settings.constrained_view());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
