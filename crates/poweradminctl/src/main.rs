// # poweradminctl - Poweradmin command-line driver
//
// A THIN layer over `poweradmin-core`: it resolves configuration, builds
// the HTTP transport and runs exactly one engine operation per invocation.
// No reconciliation logic lives here.
//
// ## Configuration
//
// Connection settings come from environment variables only:
//
// - `POWERADMIN_API_URL`: base URL of the Poweradmin installation
// - `POWERADMIN_API_KEY`: API key (takes precedence over basic credentials)
// - `POWERADMIN_USERNAME` / `POWERADMIN_PASSWORD`: basic credentials
// - `POWERADMIN_INSECURE`: skip TLS verification (`true`/`false`)
// - `POWERADMIN_API_VERSION`: must be `v2`
// - `POWERADMIN_TIMEOUT_SECS`: per-request HTTP timeout
// - `POWERADMIN_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export POWERADMIN_API_URL=https://dns.example.com
// export POWERADMIN_API_KEY=your_key
//
// poweradminctl show rrset 12/www/A
// poweradminctl bulk 12 changes.json
// ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use poweradmin_core::model::BulkOperation;
use poweradmin_core::{
    BulkClient, ClientConfig, Lookups, PermissionRef, ReadOutcome, RecordFilter, Repositories, RequestContext,
    ResourceKind, ResourceRegistry,
};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const LOG_LEVEL_VAR: &str = "POWERADMIN_LOG_LEVEL";

/// Exit codes
///
/// - 0: Command succeeded
/// - 1: Configuration error
/// - 2: The command failed
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    Success = 0,
    ConfigError = 1,
    CommandFailed = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "poweradminctl", version, about = "Drive Poweradmin DNS objects from the command line")]
struct Cli {
    /// Abort the command after this many seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import an entity by external id and print its current state
    Show {
        /// zone, record, rrset or user
        kind: ResourceKind,
        /// `<id>` / `<name>`, `<zone>/<record>`, `<zone>/<name>/<type>`
        id: String,
    },
    /// Delete an entity by external id; an absent entity is not an error
    Delete { kind: ResourceKind, id: String },
    /// Submit a JSON array of bulk operations to a zone as one unit
    Bulk { zone_id: i64, file: PathBuf },
    /// List zones
    Zones,
    /// Look up a zone by id or exact name
    Zone { zone: String },
    /// List records of a zone
    Records {
        zone_id: i64,
        #[arg(long = "type")]
        rtype: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// List RRSets of a zone
    Rrsets {
        zone_id: i64,
        #[arg(long = "type")]
        rtype: Option<String>,
    },
    /// List permissions
    Permissions,
    /// Look up a permission by id or exact name
    Permission { permission: String },
    /// Look up a user by username
    User { username: String },
}

fn log_level() -> Result<Level> {
    let raw = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| "info".to_string());
    Ok(match raw.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => anyhow::bail!(
            "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            LOG_LEVEL_VAR,
            raw
        ),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    // Logs go to stderr; stdout carries command output only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };
    debug!(?config, "Configuration loaded");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::CommandFailed.into();
        }
    };

    rt.block_on(async {
        match run(cli, config).await {
            Ok(()) => CtlExitCode::Success,
            Err(e) => {
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                CtlExitCode::CommandFailed
            }
        }
    })
    .into()
}

/// Context for the whole command: cancelled on Ctrl-C, bounded by `--timeout`
fn command_context(timeout: Option<u64>) -> RequestContext {
    let (ctx, handle) = RequestContext::cancellable();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            handle.cancel();
        }
    });
    match timeout {
        Some(secs) => ctx.with_timeout(Duration::from_secs(secs)),
        None => ctx,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, config: ClientConfig) -> Result<()> {
    let client = poweradmin_http::client_from_config(&config)?;
    let ctx = command_context(cli.timeout);
    let lookups = Lookups::new(Repositories::new(client.clone()));

    match cli.command {
        Command::Show { kind, id } => {
            let registry = ResourceRegistry::new(client);
            match registry.import_and_read(&ctx, kind, &id).await? {
                ReadOutcome::Present(applied) => print_json(&applied)?,
                ReadOutcome::Absent => anyhow::bail!("{} {} does not exist", kind, id),
            }
        }
        Command::Delete { kind, id } => {
            let registry = ResourceRegistry::new(client);
            let applied = registry.import(&ctx, kind, &id).await?;
            registry.delete(&ctx, &applied).await?;
            info!(kind = %kind, id = %id, "Deleted");
        }
        Command::Bulk { zone_id, file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let operations: Vec<BulkOperation> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of bulk operations", file.display()))?;
            let outcome = BulkClient::new(client).submit(&ctx, zone_id, operations).await?;
            print_json(&outcome)?;
        }
        Command::Zones => print_json(&lookups.zones(&ctx).await?)?,
        Command::Zone { zone } => {
            let zone = poweradmin_core::import::parse_zone(&zone)?;
            print_json(&lookups.zone(&ctx, &zone).await?)?;
        }
        Command::Records { zone_id, rtype, name } => {
            let filter = RecordFilter { rtype, name };
            print_json(&lookups.records(&ctx, zone_id, &filter).await?)?;
        }
        Command::Rrsets { zone_id, rtype } => {
            print_json(&lookups.rrsets(&ctx, zone_id, rtype.as_deref()).await?)?;
        }
        Command::Permissions => print_json(&lookups.permissions(&ctx).await?)?,
        Command::Permission { permission } => {
            let permission = match permission.parse::<i64>() {
                Ok(id) => PermissionRef::Id(id),
                Err(_) => PermissionRef::Name(permission),
            };
            print_json(&lookups.permission(&ctx, &permission).await?)?;
        }
        Command::User { username } => print_json(&lookups.user(&ctx, &username).await?)?,
    }

    Ok(())
}
