//! # cinerow-home
//!
//! Resolves the landing page (banner plus rows) against the live providers
//! and prints it as JSON. Also exposes the individual lookups the page is
//! built from: search, trailer resolution and streaming providers.

use anyhow::Context;
use cinerow_core::{
    Catalog, CatalogConfig, ConfigLoad, ConfigLoader, HomeFeed, PlaybackMode,
    PlaybackState, VideoSession, VideoTarget,
};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::{path::PathBuf, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cinerow-home")]
#[command(about = "Movie landing page and trailer lookups from TMDB and OMDb")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to a cinerow.toml (overrides CINEROW_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Env file to load before reading the environment
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    /// Give up on lookups that take longer than this
    #[arg(
        long,
        global = true,
        default_value = "30s",
        value_parser = humantime::parse_duration
    )]
    timeout: Duration,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Banner and every landing-page row (default)
    Home,
    /// Free-text search on the rating provider
    Search { query: String },
    /// Resolve a trailer by movie id or title
    Trailer {
        /// Numeric ids are movie ids; anything else is searched as a title
        target: String,
    },
    /// Streaming providers for a movie id
    Providers {
        id: u64,
        /// Region code, defaults to the configured region
        #[arg(long)]
        region: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Override via RUST_LOG.
                    "info,cinerow_core=info,reqwest=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ConfigLoad {
        config,
        config_path,
        warnings,
    } = load_config(&cli)?;
    if let Some(path) = &config_path {
        info!(path = %path.display(), "configuration loaded");
    }
    for warning in &warnings {
        warn!("{warning}");
    }

    let catalog =
        Catalog::remote(&config).context("failed to build catalog clients")?;

    let output = match cli.command.unwrap_or(Command::Home) {
        Command::Home => render_home(catalog, &config, cli.timeout).await?,
        Command::Search { query } => {
            let results = with_timeout(cli.timeout, catalog.search(&query))
                .await
                .context("search timed out")?;
            serde_json::to_value(results)?
        }
        Command::Trailer { target } => {
            let target = match target.parse::<u64>() {
                Ok(id) => VideoTarget::Id(id),
                Err(_) => VideoTarget::Title(target),
            };
            let session = VideoSession::new(
                catalog.source(),
                config.assets.demo_video_url.clone(),
            );
            resolve(&session, target, PlaybackMode::Trailer, cli.timeout)
                .await?
        }
        Command::Providers { id, region } => {
            let session = VideoSession::new(
                catalog.source(),
                config.assets.demo_video_url.clone(),
            );
            let region = region.unwrap_or_else(|| config.region.clone());
            resolve(
                &session,
                VideoTarget::Id(id),
                PlaybackMode::Streaming { region },
                cli.timeout,
            )
            .await?
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    loader.load().context("failed to load configuration")
}

async fn render_home(
    catalog: Catalog,
    config: &CatalogConfig,
    timeout: Duration,
) -> anyhow::Result<Value> {
    let feed = HomeFeed::new(catalog, config);
    feed.start();
    let snapshot = with_timeout(timeout, feed.settled())
        .await
        .context("landing page did not settle in time")?;
    feed.stop();

    info!(
        rows = snapshot.rows.len(),
        cards = snapshot.rows.iter().map(|r| r.cards.len()).sum::<usize>(),
        "landing page settled"
    );
    Ok(serde_json::to_value(snapshot)?)
}

async fn resolve(
    session: &VideoSession,
    target: VideoTarget,
    mode: PlaybackMode,
    timeout: Duration,
) -> anyhow::Result<Value> {
    session.open(target, mode);
    let state = match with_timeout(timeout, session.settled()).await {
        Ok(state) => state,
        Err(err) => {
            session.close();
            return Err(err).context("video lookup timed out");
        }
    };
    session.close();

    Ok(match state {
        PlaybackState::Resolved(video) => json!({
            "status": "resolved",
            "movie_id": video.movie_id,
            "name": video.video.name,
            "url": video.url,
        }),
        PlaybackState::Providers(providers) => json!({
            "status": "providers",
            "providers": providers,
        }),
        PlaybackState::Failed(failure) => {
            session.play_demo();
            json!({
                "status": "failed",
                "reason": failure.message,
                "demo_url": session.state().play_url(),
            })
        }
        other => json!({ "status": format!("{other:?}") }),
    })
}

async fn with_timeout<F: std::future::Future>(
    timeout: Duration,
    future: F,
) -> anyhow::Result<F::Output> {
    tokio::time::timeout(timeout, future).await.map_err(|_| {
        anyhow::anyhow!(
            "no result after {}",
            humantime::format_duration(timeout)
        )
    })
}
