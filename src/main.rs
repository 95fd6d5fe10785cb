use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use contribsync::config::Config;
use contribsync::stars::StarsClient;
use contribsync::sync;

/// No flags, no subcommands: the periodic job runner just executes the
/// binary. Deriving `Parser` still gives `--help`/`--version`.
#[derive(Parser, Debug)]
#[command(
    name = "contribsync",
    version,
    about = "Syncs published blog posts and videos into the Stars contributions API"
)]
struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is a convenience for local runs; deployments set the
    // variables directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let _args = Args::parse();

    let Config {
        api_url,
        blog_feed_url,
        video_feed_url,
        token,
    } = Config::from_env().context("configuration error")?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("contribsync/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")?;

    let stars = StarsClient::new(client.clone(), api_url.as_str(), token);

    let report = sync::run(&client, &stars, &blog_feed_url, &video_feed_url).await?;

    tracing::info!(
        fetched = report.fetched,
        submitted = report.submitted,
        created = report.created.len(),
        "Sync complete"
    );

    Ok(())
}
