use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use club_stats::api::{build_router, state::AppState};
use club_stats::config::AppConfig;
use club_stats::dashboard::{Dashboard, JourneeFilter};
use club_stats::fetch::load_from_config;
use club_stats::models::JourneeId;

#[derive(Parser)]
#[command(name = "club-stats")]
#[command(about = "Table tennis club statistics across playing days")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./club-stats.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Load documents from this base URL instead of the data directory
    #[arg(long)]
    base_url: Option<Url>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Player leaderboard
    Leaderboard {
        /// "all" or a journée identifier (e.g. J3_20251012)
        #[arg(long, default_value = "all")]
        filter: String,

        /// Re-sort by this column (e.g. sets.ratio)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        direction: String,
    },

    /// Best players of one journée
    Mvp {
        /// Journée identifier
        journee: String,
    },

    /// Headline club figures
    Totals,

    /// Club team-match record per journée
    Evolution,

    /// Encounters won and lost by number of sets
    Sets {
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Match summaries of one journée
    Overview {
        /// Journée identifier
        journee: String,
    },

    /// Rosters and encounters of one match
    Match {
        /// Journée identifier
        journee: String,

        /// Position of the match in the journée, as listed by `overview`
        index: usize,
    },

    /// Encounter history of one player
    History {
        /// Player name, e.g. "Jean DUPONT"
        name: String,

        #[arg(long, default_value = "all")]
        filter: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Loading {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = Some(base_url);
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    // Initialize tracing; stdout is reserved for command output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            cli.json_logs
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!cli.json_logs)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    tracing::info!("Starting club-stats v{}", env!("CARGO_PKG_VERSION"));

    let corpus = load_from_config(&config).await?;
    let dashboard = Dashboard::new(corpus, &config.club, config.ranking.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let state = AppState {
                dashboard: Arc::new(dashboard),
            };
            let app = build_router(state, &config.server.cors_origin);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Leaderboard {
            filter,
            sort,
            direction,
        } => {
            let filter: JourneeFilter = filter.parse()?;
            let entries = dashboard.statistics_for(&filter)?;
            let entries = match sort {
                Some(column) => dashboard.sort_by(&entries, &column, &direction)?,
                None => entries,
            };
            print_json(&entries)?;
        }
        Commands::Mvp { journee } => {
            print_json(&dashboard.mvp_and_top3_for(&JourneeId::new(journee))?)?;
        }
        Commands::Totals => print_json(&dashboard.club_totals())?,
        Commands::Evolution => print_json(&dashboard.evolution_series())?,
        Commands::Sets { filter } => {
            let filter: JourneeFilter = filter.parse()?;
            print_json(&dashboard.set_distribution(&filter)?)?;
        }
        Commands::Overview { journee } => {
            print_json(&dashboard.journee_overview(&JourneeId::new(journee))?)?;
        }
        Commands::Match { journee, index } => {
            print_json(&dashboard.match_detail(&JourneeId::new(journee), index)?)?;
        }
        Commands::History { name, filter } => {
            let filter: JourneeFilter = filter.parse()?;
            print_json(&dashboard.history_for(&name, &filter)?)?;
        }
    }

    Ok(())
}
