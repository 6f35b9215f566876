use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use rulesync::utils::HttpFetcher;
use rulesync::{SyncOptions, SyncSettings, Syncer};

/// Sync rule lists from upstream repositories
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Skip git pull --rebase before syncing
    #[arg(long)]
    no_pull: bool,

    /// Path to a TOML settings file replacing the built-in rule sources
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Repository root the rule lists are written under
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let settings = SyncSettings::load(args.config.as_deref()).context("Failed to load settings")?;
    let fetcher = HttpFetcher::from_settings(&settings).context("Failed to set up HTTP client")?;

    info!("Syncing rule lists under {}", args.root.display());
    let syncer = Syncer::new(&settings, &fetcher, args.root);
    let options = SyncOptions {
        pull: !args.no_pull,
    };

    syncer
        .run(options, |event| println!("{}", event))
        .context("Rule sync failed")?;

    Ok(())
}
