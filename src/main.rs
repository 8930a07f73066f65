//! packer - drive many concurrent API calls through an execute packer
//!
//! Issues `--calls` identical calls at once against the live API and reports
//! how they were batched.

use anyhow::Context;
use clap::Parser;
use execute_packer::transport::http::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use execute_packer::utils::logging::init_tracing;
use execute_packer::{
    HttpTransport, HttpTransportConfig, Packer, PackerConfig, PackerError, Params,
};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "packer", version, about = "Batch concurrent API calls into execute scripts")]
struct Cli {
    /// Access token attached to every call
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Number of concurrent calls
    #[arg(long, default_value_t = 100)]
    calls: usize,

    /// Method to call
    #[arg(long, default_value = "utils.resolveScreenName")]
    method: String,

    /// Call parameter as key=value, repeatable
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// YAML packer configuration; PACKER_* environment variables otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API version
    #[arg(long, default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Verbose packer logging
    #[arg(long)]
    debug: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {:?}", raw)),
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    calls: usize,
    succeeded: usize,
    failed: usize,
    rejected: usize,
    batch_level_failures: usize,
    batches: u64,
    elapsed_ms: u128,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => PackerConfig::from_file(path).await?,
        None => PackerConfig::from_env()?,
    };
    config.debug |= cli.debug;

    let transport = HttpTransport::new(
        HttpTransportConfig::new()
            .with_base_url(&cli.base_url)
            .with_version(&cli.api_version)
            .with_timeout(Duration::from_secs(cli.timeout)),
    )?;
    let (packer, trigger) =
        Packer::with_default_trigger(transport, config).context("failed to start packer")?;

    let mut params = Params::new();
    for (key, value) in &cli.params {
        params.insert(key.clone(), Value::String(value.clone()));
    }
    if let Some(token) = &cli.token {
        params.insert("access_token".to_string(), Value::String(token.clone()));
    }

    info!("Sending {} concurrent {} calls", cli.calls, cli.method);
    let started = Instant::now();
    let results = join_all((0..cli.calls).map(|_| {
        let packer = packer.clone();
        let params = params.clone();
        let method = cli.method.as_str();
        async move { packer.handle(method, params).await }
    }))
    .await;
    trigger.stop();

    for err in results.iter().filter_map(|r| r.as_ref().err()).take(5) {
        error!("call failed: {}", err);
    }

    let errors: Vec<&PackerError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    let failed = errors.len();
    let summary = Summary {
        calls: cli.calls,
        succeeded: cli.calls - failed,
        failed,
        rejected: errors.iter().filter(|e| e.is_admission()).count(),
        batch_level_failures: errors.iter().filter(|e| e.is_batch_level()).count(),
        batches: packer.stats().batches_dispatched,
        elapsed_ms: started.elapsed().as_millis(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if failed > 0 {
        anyhow::bail!("{} of {} calls failed", failed, cli.calls);
    }
    Ok(())
}
