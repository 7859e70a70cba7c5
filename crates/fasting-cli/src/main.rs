use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "fasting-cli", version, about = "Fasting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start, end, and edit fasts
    Fast {
        #[command(subcommand)]
        action: commands::fast::FastAction,
    },
    /// Completed fasts and statistics
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Widget snapshot and refresh schedule
    Widget {
        #[command(subcommand)]
        action: commands::widget::WidgetAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("FASTING_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(err) = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("failed to init tracing: {err}");
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Fast { action } => commands::fast::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Widget { action } => commands::widget::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
