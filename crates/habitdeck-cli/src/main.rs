use clap::{Parser, Subcommand};
use habitdeck_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "habitdeck", version, about = "Habitdeck daily habit tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit list management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Flip a habit for today
    Toggle {
        /// Habit name
        habit: String,
        /// Day to toggle (only today is accepted)
        #[arg(long)]
        date: Option<String>,
    },
    /// Week grid of habits and completion flags
    Week {
        /// Any day of the week to show (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Move by this many weeks from --date (negative goes back)
        #[arg(long, allow_hyphen_values = true)]
        shift: Option<i64>,
    },
    /// Today's completion ring
    Progress,
    /// Current and best streak
    Streak,
    /// Habit ranking for the current month
    Ranking,
    /// Totals for the current month
    Summary,
    /// Archived months
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Completions per day of a month
    Activity {
        /// Month to show (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Move by this many months from --month (negative goes back)
        #[arg(long, allow_hyphen_values = true)]
        shift: Option<i32>,
    },
    /// Daily notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Storage upkeep
    Maintenance {
        #[command(subcommand)]
        action: commands::maintenance::MaintenanceAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Cloud sync
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
}

/// Log to stderr. `HABITDECK_LOG` overrides the configured level.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("HABITDECK_LOG")
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&Config::load_or_default());

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Toggle { habit, date } => commands::toggle::run(&habit, date.as_deref()),
        Commands::Week { date, shift } => commands::week::run(date.as_deref(), shift),
        Commands::Progress => commands::stats::run(commands::stats::StatsView::Progress),
        Commands::Streak => commands::stats::run(commands::stats::StatsView::Streak),
        Commands::Ranking => commands::stats::run(commands::stats::StatsView::Ranking),
        Commands::Summary => commands::stats::run(commands::stats::StatsView::Summary),
        Commands::History { action } => commands::history::run(action),
        Commands::Activity { month, shift } => commands::history::activity(month.as_deref(), shift),
        Commands::Note { action } => commands::note::run(action),
        Commands::Maintenance { action } => commands::maintenance::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Sync { action } => commands::sync::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
