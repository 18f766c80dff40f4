//! Command-line client for the UBDB service.
//!
//! # Usage
//!
//! ```bash
//! ubdb-client add --bucket photos -o alice -c us-east-1
//! ubdb-client update --bucket photos -c us-east-1 -s created
//! ubdb-client update --bucket photos -c us-east-1 -s deleting
//! ubdb-client delete --bucket photos -c us-east-1
//!
//! # Over TLS, verifying the server against a private CA
//! ubdb-client add --bucket photos -o alice -c us-east-1 \
//!     -t --ca-cert ca.pem -a ubdb.internal -p 9443
//! ```
//!
//! Exits 0 when the server accepts the request and 1 otherwise.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use snafu::{ResultExt, Snafu, ensure};
use tracing_subscriber::EnvFilter;
use ubdb_proto::proto::s3_error_details::Type as S3Type;
use ubdb_sdk::{BucketState, ClientConfig, SdkError, TlsConfig, UbdbClient};

/// Command to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Command {
    /// Reserve a bucket name.
    Add,
    /// Release a bucket name.
    Delete,
    /// Advance a bucket's state.
    Update,
}

/// Target state accepted by `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UpdateState {
    Created,
    Deleting,
}

impl From<UpdateState> for BucketState {
    fn from(state: UpdateState) -> Self {
        match state {
            UpdateState::Created => Self::Created,
            UpdateState::Deleting => Self::Deleting,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ubdb-client", version, about = "UBDB bucket name authority client")]
struct Cli {
    /// Command to run.
    #[arg(value_enum)]
    command: Command,

    /// Bucket name.
    #[arg(long)]
    bucket: String,

    /// Connect to the server using TLS.
    #[arg(short = 't', long)]
    tls: bool,

    /// Server URI (overrides address and port).
    #[arg(long)]
    uri: Option<String>,

    /// Server address.
    #[arg(short = 'a', long, default_value = "127.0.0.1")]
    address: String,

    /// Server port.
    #[arg(short = 'p', long, default_value_t = 9000)]
    port: u16,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Owner of the bucket (add).
    #[arg(short = 'o', long)]
    owner: Option<String>,

    /// Client cluster ID.
    #[arg(short = 'c', long)]
    cluster: Option<String>,

    /// State to move the bucket to (update).
    #[arg(short = 's', long, value_enum)]
    update_state: Option<UpdateState>,

    /// CA certificate file (PEM).
    #[arg(long, help_heading = "TLS")]
    ca_cert: Option<PathBuf>,

    /// Client certificate file (PEM), for servers that verify clients.
    #[arg(long, help_heading = "TLS", requires = "client_key")]
    client_cert: Option<PathBuf>,

    /// Client key file (PEM).
    #[arg(long, help_heading = "TLS", requires = "client_cert")]
    client_key: Option<PathBuf>,
}

/// A fully specified request.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    Add { owner: String, cluster: String },
    Delete { cluster: String },
    Update { cluster: String, state: BucketState },
}

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("{message}"))]
    Usage { message: String },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile { path: PathBuf, source: std::io::Error },

    #[snafu(display("{source}"))]
    Sdk { source: SdkError },
}

impl Cli {
    /// Checks per-command arguments before anything touches the network.
    fn operation(&self) -> Result<Operation, CliError> {
        ensure!(
            !self.tls || self.ca_cert.is_some(),
            UsageSnafu { message: "TLS requires a CA certificate" }
        );

        let require = |value: &Option<String>, message: &str| {
            value.clone().ok_or_else(|| UsageSnafu { message }.build())
        };

        match self.command {
            Command::Add => Ok(Operation::Add {
                owner: require(&self.owner, "add command requires an owner")?,
                cluster: require(&self.cluster, "add command requires a cluster")?,
            }),
            Command::Delete => Ok(Operation::Delete {
                cluster: require(&self.cluster, "delete command requires a cluster")?,
            }),
            Command::Update => {
                let cluster = require(&self.cluster, "update command requires a cluster")?;
                let state = self
                    .update_state
                    .ok_or_else(|| {
                        UsageSnafu { message: "update command requires an update state" }.build()
                    })?
                    .into();
                Ok(Operation::Update { cluster, state })
            },
        }
    }

    /// Returns the endpoint URL to connect to.
    fn endpoint(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        match &self.uri {
            Some(uri) if uri.contains("://") => uri.clone(),
            Some(uri) => format!("{scheme}://{}", uri.strip_prefix("dns:").unwrap_or(uri)),
            None if self.address.contains(':') => format!("{scheme}://[{}]:{}", self.address, self.port),
            None => format!("{scheme}://{}:{}", self.address, self.port),
        }
    }

    fn client_config(&self) -> Result<ClientConfig, CliError> {
        let mut builder = ClientConfig::builder().with_endpoint(self.endpoint());
        if self.tls {
            let mut tls = TlsConfig::new();
            if let Some(path) = &self.ca_cert {
                tls = tls.with_ca_cert_pem_bytes(read_file(path)?);
            }
            if let (Some(cert), Some(key)) = (&self.client_cert, &self.client_key) {
                tls = tls.with_client_cert_pem_bytes(read_file(cert)?, read_file(key)?);
            }
            builder = builder.with_tls(tls);
        }
        builder.build().context(SdkSnafu)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).context(ReadFileSnafu { path })
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let operation = cli.operation()?;
    let config = cli.client_config()?;
    tracing::debug!(endpoint = config.endpoint(), "Using server endpoint");

    let client = UbdbClient::connect(config).await.context(SdkSnafu)?;
    let result = match &operation {
        Operation::Add { owner, cluster } => client.add_bucket(&cli.bucket, owner, cluster).await,
        Operation::Delete { cluster } => client.delete_bucket(&cli.bucket, cluster).await,
        Operation::Update { cluster, state } => {
            client.update_bucket(&cli.bucket, cluster, *state).await
        },
    };
    result.context(SdkSnafu)?;
    tracing::info!(bucket = %cli.bucket, ?operation, "Server accepted request");
    Ok(())
}

fn report(err: &CliError) {
    let CliError::Sdk { source } = err else {
        tracing::error!("{err}");
        return;
    };
    match source {
        SdkError::Rpc { code, message, request_id, s3_error, .. } => {
            tracing::error!(?code, request_id = request_id.as_deref(), "RPC failed: message='{message}'");
            if let Some(s3) = s3_error {
                tracing::error!(
                    "S3ErrorDetails: type={} http_status_code={}",
                    S3Type::from(s3.kind).as_str_name(),
                    s3.http_status_code
                );
            }
        },
        other => tracing::error!("{other}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("ubdb-client").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("valid arguments")
    }

    fn usage_message(cli: &Cli) -> String {
        cli.operation().unwrap_err().to_string()
    }

    #[test]
    fn test_add_requires_owner_then_cluster() {
        assert_eq!(usage_message(&parse(&["add", "--bucket", "b1"])), "add command requires an owner");
        assert_eq!(
            usage_message(&parse(&["add", "--bucket", "b1", "-o", "alice"])),
            "add command requires a cluster"
        );
        assert_eq!(
            parse(&["add", "--bucket", "b1", "-o", "alice", "-c", "c1"]).operation().unwrap(),
            Operation::Add { owner: "alice".to_owned(), cluster: "c1".to_owned() }
        );
    }

    #[test]
    fn test_delete_requires_cluster() {
        assert_eq!(
            usage_message(&parse(&["delete", "--bucket", "b1"])),
            "delete command requires a cluster"
        );
    }

    #[test]
    fn test_update_requires_cluster_and_state() {
        assert_eq!(
            usage_message(&parse(&["update", "--bucket", "b1", "-s", "created"])),
            "update command requires a cluster"
        );
        assert_eq!(
            usage_message(&parse(&["update", "--bucket", "b1", "-c", "c1"])),
            "update command requires an update state"
        );
        assert_eq!(
            parse(&["update", "--bucket", "b1", "-c", "c1", "-s", "deleting"]).operation().unwrap(),
            Operation::Update { cluster: "c1".to_owned(), state: BucketState::Deleting }
        );
    }

    #[test]
    fn test_update_state_choices() {
        let argv = ["ubdb-client", "update", "--bucket", "b1", "-c", "c1", "-s", "creating"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_tls_requires_ca() {
        let cli = parse(&["add", "--bucket", "b1", "-o", "alice", "-c", "c1", "-t"]);
        assert_eq!(usage_message(&cli), "TLS requires a CA certificate");
    }

    #[test]
    fn test_endpoint_from_address_and_port() {
        assert_eq!(parse(&["delete", "--bucket", "b1"]).endpoint(), "http://127.0.0.1:9000");
        assert_eq!(
            parse(&["delete", "--bucket", "b1", "-a", "ubdb.internal", "-p", "9443", "-t"]).endpoint(),
            "https://ubdb.internal:9443"
        );
        assert_eq!(parse(&["delete", "--bucket", "b1", "-a", "::1"]).endpoint(), "http://[::1]:9000");
    }

    #[test]
    fn test_uri_overrides_address_and_port() {
        let cli = parse(&["delete", "--bucket", "b1", "-a", "10.0.0.1", "--uri", "dns:ubdb:7000"]);
        assert_eq!(cli.endpoint(), "http://ubdb:7000");

        let cli = parse(&["delete", "--bucket", "b1", "--uri", "https://ubdb.example.com"]);
        assert_eq!(cli.endpoint(), "https://ubdb.example.com");
    }

    #[test]
    fn test_client_cert_requires_key() {
        let argv = ["ubdb-client", "delete", "--bucket", "b1", "--client-cert", "c.pem"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_missing_ca_file_reported() {
        let cli = parse(&[
            "delete",
            "--bucket",
            "b1",
            "-c",
            "c1",
            "-t",
            "--ca-cert",
            "/nonexistent/ubdb/ca.pem",
        ]);
        let err = cli.client_config().unwrap_err();
        assert!(matches!(err, CliError::ReadFile { .. }));
    }
}
