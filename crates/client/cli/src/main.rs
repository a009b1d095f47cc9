//! Command-line front-end: runs one gacha batch and writes the result sheet.
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use config::CliConfig;
use gacha_runtime::{
    CardAssets, DirectoryOracle, FileUserStore, GachaOutcome, GachaService, RuntimeConfig,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Simulate a gacha batch and render the results
#[derive(Parser, Debug)]
#[command(name = "gacha-cli")]
#[command(about = "Simulate gacha pulls against the current banner", long_about = None)]
#[command(version)]
struct Args {
    /// User whose collection and pity counter are used
    #[arg(short, long)]
    user: String,

    /// Number of pulls in the batch
    #[arg(short, long, default_value_t = 10)]
    count: u32,

    /// Region index in the data service's region list
    #[arg(short, long, default_value_t = 0)]
    server: usize,

    /// Where to write the PNG result sheet
    #[arg(short, long, default_value = "gacha.png")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = CliConfig::from_env();

    let _guard = setup_logging(config.log_dir.as_deref())?;

    run(args, config).await
}

/// Setup logging to stderr and, when a directory is configured, to a file
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "gacha.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/gacha.log", dir.display());
    }

    Ok(guard)
}

async fn run(args: Args, config: CliConfig) -> Result<()> {
    let store = FileUserStore::new(&config.store_path)
        .with_context(|| format!("failed to open user store {}", config.store_path.display()))?;

    let mut assets = CardAssets::load_dir(&config.assets_dir).with_context(|| {
        format!("failed to load card assets from {}", config.assets_dir.display())
    })?;
    if let Some(path) = &config.font_path {
        assets = assets.with_font(CardAssets::load_font(path)?);
    }

    let mut runtime_config = RuntimeConfig::default();
    if let Some(workers) = config.render_workers {
        runtime_config.render_workers = workers;
    }
    runtime_config.rng_seed = config.rng_seed;

    let service = GachaService::builder()
        .config(runtime_config)
        .oracle(Arc::new(DirectoryOracle::new(&config.data_dir)))
        .store(Arc::new(store))
        .assets(assets)
        .build()?;

    match service.gacha(&args.user, args.count, args.server).await? {
        GachaOutcome::Image { png, results, pity } => {
            tokio::fs::write(&args.out, &png)
                .await
                .with_context(|| format!("failed to write {}", args.out.display()))?;

            for (position, result) in results.iter().enumerate() {
                println!(
                    "{:>3}  {}  {}★{}{}",
                    position + 1,
                    result.character,
                    result.rarity().stars(),
                    if result.is_new { "  NEW" } else { "" },
                    if result.is_pickup { "  PICKUP" } else { "" },
                );
            }
            println!("Pulls since last 3★ pickup: {}", pity);
            println!("Result sheet written to {}", args.out.display());
        }
        GachaOutcome::NoActiveBanner(message) => println!("{}", message),
        GachaOutcome::Empty => println!("Nothing was drawn"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_ten_pulls_on_first_server() {
        let args = Args::try_parse_from(["gacha-cli", "--user", "alice"]).unwrap();
        assert_eq!(args.count, 10);
        assert_eq!(args.server, 0);
        assert_eq!(args.out, PathBuf::from("gacha.png"));
    }

    #[test]
    fn user_is_required() {
        assert!(Args::try_parse_from(["gacha-cli"]).is_err());
    }
}
