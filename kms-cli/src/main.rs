use std::path::PathBuf;
use std::slice;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use kms_client::http_client::HttpClient;
use kms_cluster::join::join;
use kms_core::client::ClusterClient;
use kms_core::ext::init_logger_with_filter;
use kms_core::host::Host;
use kms_core::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "kms", about = "Bootstrap and inspect KMS clusters")]
struct Args {
    /// TOML file layered over the built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, env = "KMS_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, default_value = "info", global = true)]
    log: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join the endpoints into a single cluster
    Join {
        /// Overrides the configured endpoints
        endpoints: Vec<String>,
    },
    /// Print the cluster view of one endpoint
    Status { endpoint: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger_with_filter(args.log.as_str())?;
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    match args.command {
        Command::Join { endpoints } => {
            if !endpoints.is_empty() {
                settings.endpoints = endpoints;
            }
            run_join(&settings).await
        }
        Command::Status { endpoint } => run_status(&settings, &endpoint).await,
    }
}

async fn run_join(settings: &Settings) -> anyhow::Result<()> {
    let client = HttpClient::new(settings)?;
    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, aborting join");
                cancel.cancel();
            }
        })
    };
    let timeout = settings.join_timeout.to_std_duration();
    let result = tokio::time::timeout(timeout, join(&settings.endpoints, &client, &cancel))
        .await
        .with_context(|| format!("join did not finish within {:?}", timeout));
    interrupt.abort();
    let added = result??;
    if added.is_empty() {
        println!("nothing to join");
    }
    for host in added {
        println!("{} joined", host);
    }
    Ok(())
}

async fn run_status(settings: &Settings, endpoint: &str) -> anyhow::Result<()> {
    let client = HttpClient::new(settings)?;
    let host = Host::normalize(endpoint);
    let status = client.cluster_status(slice::from_ref(&host)).await?;
    for node in &status.nodes_up {
        println!("{} up", node.host);
    }
    for host in &status.nodes_down {
        println!("{} down", host);
    }
    Ok(())
}
