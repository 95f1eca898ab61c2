//! Versus CLI and REST API entry point.
//!
//! Binary name: `versus`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing::Instrument;

use cli::{Cli, Commands};
use state::AppState;
use versus_observe::taste_attrs::CLI_COMMAND;
use versus_observe::tracing_setup::{Verbosity, init_tracing, shutdown_tracing};
use versus_types::user::CreateUserRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "versus", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(Verbosity::from_flags(cli.quiet, cli.verbose), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let span = tracing::info_span!("versus.cli", { CLI_COMMAND } = cli.command.name());
    let result = run(cli).instrument(span).await;

    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init().await?;
    let json = cli.json;

    match cli.command {
        Commands::Serve { port, host } => serve(state, &host, port).await?,

        Commands::TopChoices { user, limit } => {
            cli::taste::top_choices(&state, &user, limit, json).await?;
        }

        Commands::Recommend { user } => cli::taste::recommend(&state, &user, json).await?,

        Commands::Motivations { user } => cli::taste::motivations(&state, &user, json).await?,

        Commands::Submotivations { user, candidates } => {
            cli::taste::submotivations(&state, &user, candidates, json).await?;
        }

        Commands::Leaderboard => cli::taste::leaderboard(&state, json).await?,

        Commands::Vote {
            user,
            item_one,
            item_two,
            chosen,
        } => {
            cli::vote::vote(&state, &user, &item_one, &item_two, &chosen, json).await?;
        }

        Commands::Import { external_id } => {
            cli::catalog::import(&state, &external_id, json).await?;
        }

        Commands::Exclude { user, external_id } => {
            cli::user::exclude(&state, &user, &external_id, json).await?;
        }

        Commands::CreateUser {
            username,
            first_name,
            last_name,
            profile_pic,
        } => {
            let request = CreateUserRequest {
                username,
                first_name,
                last_name,
                profile_pic,
            };
            cli::user::create_user(&state, request, json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Versus API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {}",
        console::style(format!(
            "Data: {}  Catalog: {}",
            state.data_dir.display(),
            state.config.content_provider.base_url
        ))
        .dim()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
