#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

use std::net::SocketAddr;

use clap::Parser;
use collectify::app::{report_server_error, Args};
use collectify::config::{load_config, AppConfig};
use collectify::context::AppContext;
use collectify::logging::{init_logging, set_log_file_path};
use collectify::server::{build_router, listen_for_signals, serve_until_shutdown, ShutdownSignal};
use collectify::service::recycle_bin::clear_recycle_bin;
use collectify::service::user;
use collectify::store;
use color_eyre::eyre::Result;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_config = args.log_config();
    let log_file = log_config.file_path();
    set_log_file_path(log_file.to_string_lossy().to_string());

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    let config = load_config(args.config.as_deref()).unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });
    let config = config.apply_overrides(args.overrides());
    config.validate()?;

    let pool = store::connect(&config.database.dsn, config.database.max_connections).await?;
    info!(dsn = %config.database.dsn, "database ready");

    if !config.recycle_bin.enable {
        let purged = clear_recycle_bin(&pool).await?;
        info!(purged, "recycle bin disabled, leftover deleted records purged");
    }

    let addr: SocketAddr = config.server.addr.parse()?;
    let cors_origins = config.server.cors_origins.clone();
    info!(
        "CORS origins: {}",
        if cors_origins.iter().any(|o| o == "*") {
            "*".to_string()
        } else {
            cors_origins.join(", ")
        }
    );

    if config.auth.enable {
        if user::ensure_admin(&pool).await? {
            warn!("created default account admin/admin; change its password");
        }
        info!(expire_days = config.auth.expire_days, "authentication enabled");
    }

    let ctx = AppContext::new(pool.clone(), config.recycle_bin.enable).with_auth(config.auth.clone());
    let router = build_router(ctx, cors_origins);

    let (shutdown_tx, shutdown_rx) = watch::channel(ShutdownSignal::None);
    tokio::spawn(listen_for_signals(shutdown_tx));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            report_server_error(addr, &log_file, &e);
            return Err(e.into());
        }
    };
    info!(
        "Starting Collectify on {} (recycle bin {})",
        addr,
        if config.recycle_bin.enable { "on" } else { "off" }
    );

    if let Err(e) = serve_until_shutdown(listener, router, shutdown_rx).await {
        report_server_error(addr, &log_file, &e);
        return Err(e.into());
    }

    pool.close().await;
    info!("Collectify stopped");
    Ok(())
}
