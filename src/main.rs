mod cli;
mod config;
mod download;
mod error;
mod install;
mod steam;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{github_api_url, SteamPaths};
use install::{update_proton, UpdateOptions};
use steam::DEFAULT_SETTLE_DELAY;
use types::UpdateOutcome;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli) {
        eprintln!("Unable to set up logging: {}", e);
    }

    match run(&cli).await {
        Ok(UpdateOutcome::AlreadyInstalled(_)) => {}
        Ok(UpdateOutcome::Installed { dir, summary }) => {
            tracing::info!(
                "Finished extracting {} ({} files, {} links)",
                dir.display(),
                summary.files,
                summary.links
            );
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "info"
    } else if cli.verbose == 1 {
        "debug"
    } else {
        "trace"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

async fn run(cli: &Cli) -> Result<UpdateOutcome> {
    let options = UpdateOptions {
        api_base: github_api_url(),
        repo: cli.repo.clone(),
        paths: SteamPaths::from_arg(&cli.steam_dir),
        settle_delay: DEFAULT_SETTLE_DELAY,
    };

    update_proton(&options)
        .await
        .with_context(|| format!("Unable to update compatibility tool from {}", options.repo))
}
