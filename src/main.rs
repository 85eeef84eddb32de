//! Binary entry point: wires configuration, repositories, the orchestrator,
//! and the scheduler together.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;
use futures::FutureExt;
use log::error;

use dexmirror::client::{AssetListClient, NodeClient};
use dexmirror::config::{Config, TaskConfig};
use dexmirror::error::IndexerError;
use dexmirror::indexer::Indexer;
use dexmirror::repo::{
    DieselPersistRepository, LcdNodeRepository, Network, Repositories, VerifiedAssetRepository,
};
use dexmirror::scheduler::{Backoff, ErrorHook, Scheduler, Task, TaskFn};
use dexmirror::utils::db_connect;
use dexmirror::utils::logger::setup_logger;

/// Command-line interface.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional one-shot subcommand; the default runs the scheduler.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// One-shot operator commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the token sync once and exit
    Tokens,
    /// Run the verified-token sync once and exit
    VerifiedTokens,
    /// Run the pool snapshot sync once and exit
    Pools,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger()?;
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let indexer = Arc::new(build_indexer(&config)?);

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Tokens) => indexer.update_tokens().await?,
        Some(Commands::VerifiedTokens) => indexer.update_verified_tokens().await?,
        Some(Commands::Pools) => indexer.update_latest_pools().await?,
        None => run_scheduler(&config, indexer).await,
    }

    Ok(())
}

/// Constructs the orchestrator over its concrete repositories.
///
/// Identity and configuration errors (unregistered factory, bad pool URL)
/// fail here, at startup, never inside a scheduled loop.
fn build_indexer(config: &Config) -> Result<Indexer, IndexerError> {
    let network = Network::find_by_factory(&config.factory_address)?;
    let node_client = NodeClient::new(&config.node_url(), config.http_timeout)?;
    let asset_client = AssetListClient::new(config.http_timeout)?;
    let src_pool = db_connect::new_pool(&config.src_database_url)?;
    let dst_pool = db_connect::new_pool(&config.dst_database_url)?;

    Ok(Indexer::new(
        &config.chain_id,
        Repositories {
            node: Arc::new(LcdNodeRepository::new(
                node_client,
                &config.chain_id,
                network,
            )),
            asset: Arc::new(VerifiedAssetRepository::new(
                asset_client,
                &config.factory_address,
            )?),
            persist: Arc::new(DieselPersistRepository::new(
                &config.chain_id,
                src_pool,
                dst_pool,
            )),
        },
    ))
}

/// Runs the three reconciliation tasks until one escalates fatally, then
/// shuts down with a non-zero status for the process supervisor to restart.
async fn run_scheduler(config: &Config, indexer: Arc<Indexer>) {
    // Decode failures get their own line; they smell like a schema
    // regression rather than transient unavailability.
    let hook: ErrorHook = Arc::new(|task, err| {
        if matches!(err.root(), IndexerError::Decode(_)) {
            log::warn!("scheduler: {task} hit a decode error; possible schema regression");
        }
    });

    let scheduler = Scheduler::new()
        .register(reconcile_task("update_tokens", config.token_task, {
            let indexer = Arc::clone(&indexer);
            Arc::new(move || {
                let indexer = Arc::clone(&indexer);
                async move { indexer.update_tokens().await }.boxed()
            })
        }))
        .register(reconcile_task(
            "update_verified_tokens",
            config.verified_task,
            {
                let indexer = Arc::clone(&indexer);
                Arc::new(move || {
                    let indexer = Arc::clone(&indexer);
                    async move { indexer.update_verified_tokens().await }.boxed()
                })
            },
        ))
        .register(reconcile_task("update_latest_pools", config.pool_task, {
            let indexer = Arc::clone(&indexer);
            Arc::new(move || {
                let indexer = Arc::clone(&indexer);
                async move { indexer.update_latest_pools().await }.boxed()
            })
        }))
        .with_error_hook(hook);

    if let Err(fatal) = scheduler.run().await {
        // The report form carries the full source chain and a backtrace
        // when RUST_BACKTRACE is set.
        error!("scheduler: {:?}", eyre::Report::new(fatal));
        log::logger().flush();
        std::process::exit(1);
    }
}

/// Packages a reconciliation procedure with its scheduling parameters.
fn reconcile_task(name: &'static str, cfg: TaskConfig, run: TaskFn) -> Task {
    Task {
        name,
        base_delay: cfg.interval,
        tolerance: cfg.tolerance,
        backoff: Backoff::Exponential,
        run,
    }
}
