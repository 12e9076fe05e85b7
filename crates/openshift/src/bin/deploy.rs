//! deploy - apply deployment requests to an OpenShift cluster.
//!
//! # Environment Variables
//!
//! - `OPENSHIFT_NAMESPACE` - namespace used when `--namespace` is omitted
//! - `KUBE_CONTEXT` - kubeconfig context (in-cluster or default context otherwise)
//! - `OPENSHIFT_ROLLOUT_FAILURE` - `warn` to report a forced update as successful
//!   even when the rollout could not be triggered
//! - `RUST_LOG` - log filter (default `info`)
//!
//! # Examples
//!
//! ```bash
//! # Create the deployment config, or replace and roll it out when `force: true`
//! deploy apply -f hello-world.yaml
//!
//! # Pin to infra nodes regardless of the file's node selector
//! deploy apply -f hello-world.yaml --node-selector region=infra
//!
//! # Inspect, roll out or remove an existing config
//! deploy get hello-world --namespace demo-dev
//! deploy rollout hello-world --app hello --namespace demo-dev
//! deploy delete hello-world --namespace demo-dev
//!
//! # Expose the application's service
//! deploy expose hello-world --port 8080 --namespace demo-dev
//!
//! # Make sure the image stream the trigger follows exists
//! deploy stream hello --namespace demo-dev
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use openshift::{ClusterConfig, DeploymentRequest, OpenShift, RestConfig, RolloutFailurePolicy};

#[derive(Parser)]
#[command(name = "deploy")]
#[command(about = "Reconcile OpenShift deployment configs from declarative requests")]
#[command(version)]
struct Cli {
    /// Kubeconfig context (or set `KUBE_CONTEXT` env var)
    #[arg(long, global = true, env = "KUBE_CONTEXT")]
    context: Option<String>,

    /// Namespace (or set `OPENSHIFT_NAMESPACE` env var)
    #[arg(long, short, global = true, env = "OPENSHIFT_NAMESPACE")]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or replace a deployment config from a YAML request
    Apply {
        #[arg(long, short)]
        file: PathBuf,

        /// Replace an existing config even if the request does not set `force`
        #[arg(long)]
        force: bool,

        /// Report success when the update lands but the rollout cannot be triggered
        #[arg(long)]
        tolerate_rollout_failure: bool,

        /// Extra node constraint as `key=value`; repeatable, overrides the file
        #[arg(long = "node-selector", value_name = "KEY=VALUE")]
        node_selectors: Vec<String>,
    },

    /// Print a deployment config as YAML
    Get { full_name: String },

    /// Delete a deployment config
    Delete { full_name: String },

    /// Roll out the latest trigger inputs now
    Rollout {
        full_name: String,

        /// Application name (defaults to the config name)
        #[arg(long)]
        app: Option<String>,
    },

    /// Create or replace a route to the service of the same name
    Expose {
        name: String,

        #[arg(long)]
        port: i32,
    },

    /// Ensure the image stream a trigger follows exists
    Stream { name: String },
}

fn load_request(path: &Path) -> Result<DeploymentRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut cluster = ClusterConfig::default();
    if let Some(context) = cli.context {
        cluster.context = Some(context);
    }
    if let Some(namespace) = cli.namespace {
        cluster.namespace = namespace;
    }
    if let Commands::Apply {
        tolerate_rollout_failure: true,
        ..
    } = cli.command
    {
        cluster.rollout_policy = RolloutFailurePolicy::Warn;
    }

    let rest = RestConfig::infer(&cluster)
        .await
        .context("Failed to resolve cluster credentials")?;
    let openshift =
        OpenShift::from_rest_config(&rest, &cluster).context("Failed to connect to cluster")?;
    let namespace = cluster.namespace.as_str();

    match cli.command {
        Commands::Apply {
            file,
            force,
            node_selectors,
            ..
        } => {
            let mut request = load_request(&file)?.or_namespace(namespace);
            for selector in &node_selectors {
                request = request.with_node_selector(selector)?;
            }
            request.force |= force;

            let outcome = openshift
                .deployment_configs
                .create(&request)
                .await
                .with_context(|| format!("Failed to apply {}", request.full_name))?;
            tracing::info!(
                namespace = %request.namespace,
                name = %request.full_name,
                outcome = ?outcome,
                "Applied deployment request"
            );
        }

        Commands::Get { full_name } => {
            let config = openshift
                .deployment_configs
                .get(namespace, &full_name)
                .await
                .with_context(|| format!("Failed to get {full_name}"))?;
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Delete { full_name } => {
            openshift
                .deployment_configs
                .delete(namespace, &full_name)
                .await
                .with_context(|| format!("Failed to delete {full_name}"))?;
            tracing::info!(namespace = %namespace, name = %full_name, "Deleted DeploymentConfig");
        }

        Commands::Rollout { full_name, app } => {
            let app = app.unwrap_or_else(|| full_name.clone());
            let config = openshift
                .deployment_configs
                .instantiate(&app, namespace, &full_name)
                .await
                .with_context(|| format!("Failed to roll out {full_name}"))?;
            let latest = config.status.map(|s| s.latest_version).unwrap_or_default();
            tracing::info!(namespace = %namespace, name = %full_name, latest_version = latest, "Rollout requested");
        }

        Commands::Expose { name, port } => {
            let host = openshift
                .routes
                .create(namespace, &name, port)
                .await
                .with_context(|| format!("Failed to expose {name}"))?;
            if host.is_empty() {
                tracing::info!(namespace = %namespace, name = %name, "Route created, host not yet assigned");
            } else {
                println!("{host}");
            }
        }

        Commands::Stream { name } => {
            let stream = openshift
                .image_streams
                .create(namespace, &name)
                .await
                .with_context(|| format!("Failed to ensure image stream {name}"))?;
            let repository = stream
                .status
                .map(|s| s.docker_image_repository)
                .unwrap_or_default();
            tracing::info!(namespace = %namespace, name = %name, repository = %repository, "Image stream ready");
        }
    }

    Ok(())
}
