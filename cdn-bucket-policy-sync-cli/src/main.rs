//! Scheduled entry point: pins S3 bucket policies to the CDN provider's IP ranges.

use anyhow::{Context, Result};
use cdn_bucket_policy_sync::{
    plan, ApplyOptions, InvocationResponse, PolicySyncService, SyncConfig, CLOUDFLARE_IPS_URL,
    DEFAULT_PARTITION,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "cdn-bucket-policy-sync", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the policy each bucket would receive, without calling AWS
    Plan {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Replace the policy of every configured bucket
    Sync {
        #[command(flatten)]
        target: TargetArgs,

        /// Build the policies but skip every write
        #[arg(long)]
        dry_run: bool,

        /// Stop at the first bucket that fails instead of continuing
        #[arg(long)]
        abort_on_error: bool,

        /// AWS region override for the S3 client
        #[arg(long)]
        region: Option<String>,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Comma-separated bucket names
    #[arg(long, env = "BUCKET_NAME")]
    buckets: Option<String>,

    /// Endpoint publishing the CDN IP ranges
    #[arg(long, env = "CDN_IP_RANGES_URL", default_value = CLOUDFLARE_IPS_URL)]
    ip_ranges_url: String,

    /// ARN partition of the buckets
    #[arg(long, env = "AWS_PARTITION", default_value = DEFAULT_PARTITION)]
    partition: String,
}

impl TargetArgs {
    fn into_config(self) -> SyncConfig {
        SyncConfig::new(self.buckets)
            .with_ip_ranges_url(self.ip_ranges_url)
            .with_partition(self.partition)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// 0 on success, 2 when nothing is configured, 1 for every other failure.
fn exit_code(response: &InvocationResponse) -> ExitCode {
    match response.status_code {
        200 => ExitCode::SUCCESS,
        400 => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Plan { target } => {
            let config = target.into_config();
            match plan(&config).await {
                Ok(plan) => {
                    print_json(&plan)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    log::error!("{e}");
                    let response = InvocationResponse::from_error(&e);
                    print_json(&response)?;
                    Ok(exit_code(&response))
                }
            }
        }
        Commands::Sync {
            target,
            dry_run,
            abort_on_error,
            region,
        } => {
            let config = target.into_config();
            let options = ApplyOptions {
                dry_run,
                abort_on_error,
            };
            let service = PolicySyncService::new(region).await;
            let response = service.handle(&config, options).await;
            print_json(&response)?;
            Ok(exit_code(&response))
        }
    }
}
