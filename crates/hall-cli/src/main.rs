mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, schedule::ScheduleSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hall",
    about = "Hall staff schedules: hourly primary assignments with derived lead and support",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .hall/)
    #[arg(long, global = true, env = "HALL_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize hall in the current directory
    Init {
        /// Venue name written to the new config
        #[arg(long)]
        venue: Option<String>,
    },

    /// Log in with a configured account
    Login { username: String, password: String },

    /// Forget the current session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// View and edit daily schedules
    Schedule {
        #[command(subcommand)]
        subcommand: ScheduleSubcommand,
    },

    /// List staff eligible for primary assignments
    Roster,

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Serve the JSON API
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    // RUST_LOG, when set, replaces the default level entirely
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::default().add_directive(default_level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { venue } => cmd::init::run(&root, venue.as_deref()),
        Commands::Login { username, password } => {
            cmd::session::login(&root, &username, &password, cli.json)
        }
        Commands::Logout => cmd::session::logout(&root),
        Commands::Whoami => cmd::session::whoami(&root, cli.json),
        Commands::Schedule { subcommand } => cmd::schedule::run(&root, subcommand, cli.json),
        Commands::Roster => cmd::roster::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
