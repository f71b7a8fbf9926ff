use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use modkit::{ClientHub, ModuleCtxBuilder, ModuleEntry, ModuleRegistry};
use modkit_db::{ConnectOpts, DbHandle};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use api_ingress::ApiIngress;
use auth::{AuthConfig, AuthModule};
use org_admin::OrgAdminModule;

// Adapter to make AppConfig implement modkit::ConfigProvider
struct ModkitConfigAdapter(Arc<AppConfig>);

impl modkit::ConfigProvider for ModkitConfigAdapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.module_config(module_name)
    }
}

/// OrgAdmin Server - establishment and employee administration API
#[derive(Parser)]
#[command(name = "orgadmin-server")]
#[command(about = "OrgAdmin Server - establishment and employee administration API")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);
    inject_ingress_settings(&mut config);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("OrgAdmin Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

/// `server.host`/`server.port` decide where `api_ingress` listens.
fn inject_ingress_settings(config: &mut AppConfig) {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let timeout_sec = config.server.timeout_sec;
    let section = config
        .modules
        .entry(api_ingress::MODULE_NAME.to_string())
        .or_insert_with(|| json!({}));
    if let Some(obj) = section.as_object_mut() {
        obj.insert("bind_addr".to_string(), Value::String(bind_addr));
        if timeout_sec > 0 {
            obj.entry("timeout_sec").or_insert(json!(timeout_sec));
        }
    }
}

/// Relative SQLite paths are rooted at `server.home_dir`.
fn resolve_dsn(db_config: &DatabaseConfig, home_dir: &Path) -> Result<String> {
    let dsn = db_config.url.trim();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    DbHandle::detect(dsn).context("unsupported database DSN")?;
    if dsn.starts_with("sqlite:") {
        Ok(modkit_db::sqlite::resolve_sqlite_dsn(dsn, home_dir, true)?)
    } else {
        Ok(dsn.to_string())
    }
}

fn auth_config(config: &AppConfig) -> Result<AuthConfig> {
    let raw = config
        .module_config(auth::module::MODULE_NAME)
        .ok_or_else(|| anyhow!("missing modules.auth configuration"))?;
    let cfg: AuthConfig =
        serde_json::from_value(raw.clone()).context("invalid modules.auth configuration")?;
    cfg.validate()
        .map_err(|e| anyhow!("invalid modules.auth configuration: {e}"))?;
    Ok(cfg)
}

/// Providers first: org_admin publishes the credential store auth needs, and
/// auth publishes the token verifier the REST host needs.
fn build_registry() -> Result<ModuleRegistry> {
    let org_admin = Arc::new(OrgAdminModule::default());
    let auth = Arc::new(AuthModule::default());
    let ingress = Arc::new(ApiIngress::default());

    let registry = ModuleRegistry::builder()
        .register(
            ModuleEntry::new(org_admin::MODULE_NAME, org_admin.clone())
                .with_db(org_admin.clone())
                .with_rest(org_admin),
        )
        .register(
            ModuleEntry::new(auth::module::MODULE_NAME, auth.clone())
                .with_rest(auth.clone())
                .with_stateful(auth),
        )
        .register(
            ModuleEntry::new(api_ingress::MODULE_NAME, ingress.clone())
                .with_rest_host(ingress.clone())
                .with_stateful(ingress),
        )
        .build()?;
    Ok(registry)
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database configuration is required"))?;
    let dsn = resolve_dsn(&db_config, Path::new(&config.server.home_dir))?;
    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
        ..Default::default()
    };
    let db = Arc::new(
        DbHandle::connect(&dsn, connect_opts)
            .await
            .context("failed to connect to database")?,
    );
    tracing::info!(dsn = db.dsn(), backend = ?db.engine(), "Connected to database");

    let cancel = CancellationToken::new();
    let ctx = ModuleCtxBuilder::new(cancel.clone())
        .with_db(db.clone())
        .with_config_provider(Arc::new(ModkitConfigAdapter(Arc::new(config))))
        .with_client_hub(Arc::new(ClientHub::default()))
        .build();

    let registry = build_registry()?;
    registry.run_init_phase(&ctx).await?;
    registry.run_db_phase(&db).await?;
    registry.run_rest_phase(&ctx)?;
    if let Err(e) = registry.run_start_phase(cancel.clone()).await {
        cancel.cancel();
        registry.run_stop_phase(cancel).await;
        return Err(e.into());
    }
    tracing::info!("OrgAdmin Server started");

    modkit::shutdown::wait_for_shutdown().await?;
    tracing::info!("Shutdown signal received");
    cancel.cancel();
    registry.run_stop_phase(cancel).await;
    tracing::info!("OrgAdmin Server stopped");
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("Database configuration is required"))?;
    DbHandle::detect(&db_config.url).context("unsupported database DSN")?;
    auth_config(config)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
