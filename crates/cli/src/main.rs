//! kubecap - Deployment capacity report for Kubernetes
//!
//! Takes a single point-in-time snapshot of Deployments and their
//! HorizontalPodAutoscalers, aggregates declared CPU/memory across
//! replicas and prints one row per Deployment.

mod config;
mod kube;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use report_lib::{build_index, build_rows};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::kube::Scope;
use crate::output::OutputFormat;

/// Overall deadline for the two cluster list calls
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Capacity report for Kubernetes Deployments and their autoscalers
#[derive(Parser)]
#[command(name = "kubecap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Namespace scope for this request
    #[arg(long, short)]
    namespace: Option<String>,

    /// List Deployments across all namespaces; --namespace is ignored
    #[arg(long, short = 'A')]
    all_namespaces: bool,

    /// Label selector to filter Deployments and HPAs (e.g. app=srv)
    #[arg(long, short = 'l')]
    selector: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum)]
    format: Option<OutputFormat>,

    /// Path to kubeconfig file (uses default resolution if not specified)
    #[arg(long, env = "KUBECONFIG")]
    kubeconfig: Option<String>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so the report stays pipeable.
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let file_config = config::Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable config file");
        config::Config::default()
    });

    let format = cli
        .format
        .or_else(|| file_config.parsed_format())
        .unwrap_or_default();

    let client = kube::make_client(cli.kubeconfig.as_deref()).await?;

    let namespace = if cli.all_namespaces {
        None
    } else {
        cli.namespace
            .or(file_config.default_namespace)
            .or_else(|| Some(client.default_namespace().to_string()))
    };

    let scope = Scope {
        all_namespaces: cli.all_namespaces,
        namespace,
        selector: cli.selector,
    };
    info!(scope = %scope.label(), "fetching cluster state");

    let fetch = async {
        tokio::try_join!(
            kube::list_workloads(client.clone(), &scope),
            kube::list_autoscalers(client.clone(), &scope),
        )
    };
    let (workloads, autoscalers) = tokio::time::timeout(FETCH_TIMEOUT, fetch)
        .await
        .context("timed out fetching cluster state")??;
    info!(
        deployments = workloads.len(),
        autoscalers = autoscalers.len(),
        "cluster state fetched"
    );

    let index = build_index(autoscalers);
    let rows = build_rows(&workloads, &index);

    output::print_report(&scope, &rows, format)
}
