//! Illustrative command-line front end for `pep-client`.
//!
//! This binary is demo scaffolding, not part of the core: it exists to
//! show the facade's typed builder API end to end and to exercise the
//! exit-code taxonomy a real CLI collaborator would need. Option
//! parsing, PEM loading and log configuration all live here, never in
//! the core crates.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pep_client::{ClientConfig, ClientIdentity, PepClient};
use pep_model::{Action, Attribute, Request, Resource, Subject};
use tokio_util::sync::CancellationToken;

/// Exit codes for the illustrative CLI collaborator (not the core).
mod exit_code {
    pub const OK: i32 = 0;
    /// Unused in the safe-Rust port: allocation failure is not a
    /// representable error at this layer. Kept for taxonomy parity
    /// with the original CLI.
    #[allow(dead_code)]
    pub const MEMORY: i32 = 1;
    pub const OPTION: i32 = 2;
    pub const CERT_CHAIN_READ: i32 = 3;
    pub const REQUEST_BUILD: i32 = 4;
    pub const CLIENT_RUNTIME: i32 = 5;
}

#[derive(Parser, Debug)]
#[command(name = "pep-cli", about = "Submit an authorization request to a PEP PDP endpoint")]
struct Args {
    /// PDP endpoint URL; may be repeated, tried in order on failover.
    #[arg(long = "endpoint", required = true)]
    endpoints: Vec<String>,

    /// Per-endpoint timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Disable TLS certificate validation (default: validation enabled).
    #[arg(long)]
    no_ssl_validation: bool,

    /// Client certificate chain, PEM-encoded.
    #[arg(long)]
    client_cert: Option<PathBuf>,

    /// Client private key, PEM-encoded.
    #[arg(long)]
    client_key: Option<PathBuf>,

    /// Subject distinguished name.
    #[arg(long)]
    subject_dn: String,

    /// Resource identifier.
    #[arg(long)]
    resource_id: String,

    /// Action identifier.
    #[arg(long, default_value = "read")]
    action_id: String,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

fn build_request(args: &Args) -> Result<Request, anyhow::Error> {
    if args.subject_dn.is_empty() || args.resource_id.is_empty() {
        anyhow::bail!("subject-dn and resource-id must be non-empty");
    }

    let mut subject_attr = Attribute::new("urn:oasis:names:tc:xacml:1.0:subject:subject-id");
    subject_attr.set_datatype(Some(
        "urn:oasis:names:tc:xacml:1.0:data-type:x500Name".to_string(),
    ));
    subject_attr.add_value(&args.subject_dn);
    let mut subject = Subject::new();
    subject.add_attribute(subject_attr);

    let mut resource_attr = Attribute::new("urn:oasis:names:tc:xacml:1.0:resource:resource-id");
    resource_attr.add_value(&args.resource_id);
    let mut resource = Resource::new();
    resource.add_attribute(resource_attr);

    let mut action_attr = Attribute::new("urn:oasis:names:tc:xacml:1.0:action:action-id");
    action_attr.add_value(&args.action_id);
    let mut action = Action::new();
    action.add_attribute(action_attr);

    let mut request = Request::new();
    request.add_subject(subject);
    request.add_resource(resource);
    request.set_action(Some(action));
    Ok(request)
}

enum ConfigBuildError {
    Option(anyhow::Error),
    CertChainRead(anyhow::Error),
}

fn build_config(args: &Args) -> Result<ClientConfig, ConfigBuildError> {
    let mut config = ClientConfig::new().with_ssl_validation(!args.no_ssl_validation);

    for endpoint in &args.endpoints {
        config = config.with_endpoint(endpoint).map_err(|e| ConfigBuildError::Option(e.into()))?;
    }
    config = config
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .map_err(|e| ConfigBuildError::Option(e.into()))?;
    config = config.with_log_level(args.log_level.into());

    if let (Some(cert_path), Some(key_path)) = (&args.client_cert, &args.client_key) {
        let certificate_chain_pem = fs::read(cert_path)
            .map_err(|e| ConfigBuildError::CertChainRead(anyhow::anyhow!("reading client cert {cert_path:?}: {e}")))?;
        let private_key_pem = fs::read(key_path)
            .map_err(|e| ConfigBuildError::CertChainRead(anyhow::anyhow!("reading client key {key_path:?}: {e}")))?;
        config = config.with_client_identity(ClientIdentity {
            certificate_chain_pem,
            private_key_pem,
        });
    }

    Ok(config)
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .init();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(ConfigBuildError::Option(err)) => {
            eprintln!("error: {err}");
            std::process::exit(exit_code::OPTION);
        }
        Err(ConfigBuildError::CertChainRead(err)) => {
            eprintln!("error: {err}");
            std::process::exit(exit_code::CERT_CHAIN_READ);
        }
    };

    let request = match build_request(&args) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(exit_code::REQUEST_BUILD);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start async runtime: {err}");
            std::process::exit(exit_code::CLIENT_RUNTIME);
        }
    };

    let client = PepClient::new(config);
    let cancellation = CancellationToken::new();

    let result = runtime.block_on(client.authorize(&request, &cancellation));
    match result {
        Ok(response) => {
            for result in response.results() {
                println!("resource {}: {:?}", result.resource_id(), result.decision());
            }
            std::process::exit(exit_code::OK);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(exit_code::CLIENT_RUNTIME);
        }
    }
}
