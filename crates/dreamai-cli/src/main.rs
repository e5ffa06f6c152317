use clap::{Parser, Subcommand};
use dreamai_core::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dreamai", version, about = "Dream AI journal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Journal entry management
    Entry {
        #[command(subcommand)]
        action: commands::entry::EntryAction,
    },
    /// Journaling streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr so stdout stays clean for JSON output.
/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Tracing needs the configured level, so anything worth reporting from
    // loading the config is logged once the subscriber is up.
    let first_run = Config::path().map(|p| !p.exists()).unwrap_or(false);
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&config);
    match &loaded {
        Ok(_) if first_run => info!("wrote default configuration"),
        Ok(_) => {}
        Err(e) => warn!("{e}; using default configuration"),
    }

    let result = match cli.command {
        Commands::Entry { action } => commands::entry::run(action, &config),
        Commands::Streak { action } => commands::streak::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
