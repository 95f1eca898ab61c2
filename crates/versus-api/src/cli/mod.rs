//! CLI command definitions and dispatch for the `versus` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod catalog;
pub mod taste;
pub mod user;
pub mod vote;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};
use versus_types::id::UserId;

use crate::state::AppState;

/// Pairwise "this or that" taste profiling.
#[derive(Parser)]
#[command(name = "versus", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Show a user's most chosen items.
    #[command(name = "top-choices")]
    TopChoices {
        /// Username or user id.
        user: String,

        /// Number of rows (defaults to the configured view size).
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Recommend items related to a user's favorites.
    Recommend {
        /// Username or user id.
        user: String,
    },

    /// Motivation affinity report.
    Motivations {
        /// Username or user id.
        user: String,
    },

    /// Submotivation affinity report with the derived keyword query.
    Submotivations {
        /// Username or user id.
        user: String,

        /// Also run the keyword query against the content provider.
        #[arg(long)]
        candidates: bool,
    },

    /// Users ranked by number of votes cast.
    Leaderboard,

    /// Record a vote between two items.
    Vote {
        /// Username or user id.
        user: String,
        /// First item shown.
        item_one: String,
        /// Second item shown.
        item_two: String,
        /// The item chosen (one of the two above).
        chosen: String,
    },

    /// Import an item from the content provider by its external id.
    Import {
        external_id: String,
    },

    /// Never recommend an item to a user again.
    Exclude {
        /// Username or user id.
        user: String,
        external_id: String,
    },

    /// Register a new user.
    #[command(name = "create-user")]
    CreateUser {
        #[arg(long)]
        username: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        profile_pic: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Serve { .. } => "serve",
            Commands::TopChoices { .. } => "top-choices",
            Commands::Recommend { .. } => "recommend",
            Commands::Motivations { .. } => "motivations",
            Commands::Submotivations { .. } => "submotivations",
            Commands::Leaderboard => "leaderboard",
            Commands::Vote { .. } => "vote",
            Commands::Import { .. } => "import",
            Commands::Exclude { .. } => "exclude",
            Commands::CreateUser { .. } => "create-user",
            Commands::Completions { .. } => "completions",
        }
    }
}

/// Accept either a user id or a username.
pub async fn resolve_user(state: &AppState, user: &str) -> anyhow::Result<UserId> {
    if let Ok(id) = user.parse::<UserId>() {
        return Ok(id);
    }
    Ok(state.user_service.get_by_username(user).await?.id)
}

/// Spinner for calls that may wait on the network.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
