//! Social Club - Membership Registry
//!
//! Composition root: parses the CLI, initializes logging, seeds the store
//! and serves the HTTP API (or exports the seeded members as CSV).

use chrono::Utc;
use clap::{Parser, Subcommand};
use social_club::auth::{DEMO_PASSWORD_DEFAULT, DEMO_USERNAME_DEFAULT};
use social_club::export::render_csv;
use social_club::store::MemberStore;
use social_club::{
    router, AppState, DemoCredentials, SeedConfig, ServerConfig, APP_NAME, APP_VERSION,
    HTTP_BIND_ADDRESS_DEFAULT, SEED_DEFAULT, SEED_MEMBER_COUNT_DEFAULT,
};
use std::path::PathBuf;

// =============================================================================
// CLI
// =============================================================================

/// Social club membership registry
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "In-memory social club membership registry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP API bind address
    #[arg(short, long, env = "SOCIAL_CLUB_BIND", default_value = HTTP_BIND_ADDRESS_DEFAULT)]
    bind: String,

    /// Seed for the initial member data
    #[arg(long, env = "SOCIAL_CLUB_SEED", default_value_t = SEED_DEFAULT)]
    seed: u64,

    /// Number of members generated at startup
    #[arg(long, env = "SOCIAL_CLUB_MEMBERS", default_value_t = SEED_MEMBER_COUNT_DEFAULT)]
    members: usize,

    /// Demo login username
    #[arg(long, env = "SOCIAL_CLUB_USERNAME", default_value = DEMO_USERNAME_DEFAULT)]
    username: String,

    /// Demo login password
    #[arg(long, env = "SOCIAL_CLUB_PASSWORD", default_value = DEMO_PASSWORD_DEFAULT, hide_env_values = true)]
    password: String,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Write the seeded members as CSV and exit
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "info,tower_http=debug",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::new(
        &cli.bind,
        SeedConfig {
            seed: cli.seed,
            count: cli.members,
        },
        DemoCredentials::new(cli.username, cli.password),
    )?;
    let today = Utc::now().date_naive();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, today).await,
        Command::Export { output } => export(config, today, output).await,
    }
}

async fn serve(config: ServerConfig, today: chrono::NaiveDate) -> anyhow::Result<()> {
    tracing::info!("{} v{}", APP_NAME, APP_VERSION);

    let state = AppState::seeded(&config, today)?;
    let app = router(state);

    tracing::info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn export(
    config: ServerConfig,
    today: chrono::NaiveDate,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store = MemberStore::seeded(config.seed, today)?;
    let csv = render_csv(&store.list());

    match output {
        Some(path) => {
            tokio::fs::write(&path, csv).await?;
            tracing::info!("Exported {} members to {}", store.len(), path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}
