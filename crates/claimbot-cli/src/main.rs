//! claimbot CLI - claim matching marketplace bounties for a wallet
//!
//! Usage:
//!   claimbot --wallet-address 0x... [--tags rust,docs] [--min-reward 5]
//!            [--max-claims 2] [--dry-run] [--config claimbot.toml]
//!
//! Every input can also come from a GitHub Actions style `INPUT_*`
//! environment variable. Outputs are appended to `$GITHUB_OUTPUT` when set.

use anyhow::{Context, Result};
use claimbot_client::BountyApiClient;
use claimbot_core::{format_usdc, ClaimConfig, ClaimConfigFile, RunInputs};
use claimbot_pipeline::{ClaimPipeline, OutputTarget, RunOutputs, RunResult};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "claimbot")]
#[command(author, version, about = "Automatically claim matching marketplace bounties")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// TOML config file with defaults for any input
    #[arg(long, env = "CLAIMBOT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append outputs to this file instead of printing them
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Marketplace base URL
    #[arg(long, env = "INPUT_API_URL")]
    api_url: Option<String>,

    /// Wallet to claim bounties for
    #[arg(long, env = "INPUT_WALLET_ADDRESS")]
    wallet_address: Option<String>,

    /// Name sent along with each claim
    #[arg(long, env = "INPUT_CLAIMER_NAME")]
    claimer_name: Option<String>,

    /// Comma-separated tags; a bounty needs at least one
    #[arg(long, env = "INPUT_TAGS")]
    tags: Option<String>,

    /// Minimum reward in USDC (inclusive)
    #[arg(long, env = "INPUT_MIN_REWARD")]
    min_reward: Option<String>,

    /// Maximum number of bounties to claim this run
    #[arg(long, env = "INPUT_MAX_CLAIMS")]
    max_claims: Option<String>,

    /// Fetch and filter only ("true" to enable)
    #[arg(
        long,
        env = "INPUT_DRY_RUN",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    dry_run: Option<String>,
}

impl Cli {
    fn inputs(&self) -> RunInputs {
        RunInputs {
            api_url: self.api_url.clone(),
            wallet_address: self.wallet_address.clone(),
            claimer_name: self.claimer_name.clone(),
            tags: self.tags.clone(),
            min_reward: self.min_reward.clone(),
            max_claims: self.max_claims.clone(),
            dry_run: self.dry_run.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Action failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file = ClaimConfigFile::load_or_default(cli.config.as_deref())
        .context("Failed to load config file")?;
    let config = cli.inputs().resolve(&file)?;
    let target = OutputTarget::from_path(cli.output_file.clone());

    log_banner(&config);

    let client = BountyApiClient::new(&config.api_url, config.request_timeout)?;
    let pipeline = ClaimPipeline::new(client.clone(), client, config);
    let result = pipeline.run().await?;

    RunOutputs::from_result(&result)?
        .write(&target)
        .context("Failed to write run outputs")?;

    log_summary(&result);
    Ok(())
}

fn log_banner(config: &ClaimConfig) {
    info!("Bounty auto-claim");
    info!("API: {}", config.api_url);
    info!(
        "Min reward: ${} USDC",
        format_usdc(config.criteria.min_reward)
    );
    info!("Tags: {}", config.criteria.tags_display());
    info!("Max claims: {}", config.max_claims);
    info!("Dry run: {}", config.dry_run);
}

fn log_summary(result: &RunResult) {
    for attempt in result.failures() {
        info!(
            "Not claimed: #{} ({})",
            attempt.bounty_id,
            attempt.outcome.message()
        );
    }

    if result.claimed_count() > 0 {
        info!("Next steps:");
        info!("  1. Check the bounty board for your claimed bounties");
        info!("  2. Complete the work according to requirements");
        info!("  3. Submit your proof via the bounty board");
    }
}
