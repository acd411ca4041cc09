//! Signal handling and bounded graceful shutdown.

use std::future::IntoFuture;
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// In-flight requests get this long to finish once shutdown starts.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    None,
    Shutdown,
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            warn!("Failed to listen for SIGTERM: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Wait for Ctrl-C or SIGTERM, then broadcast `Shutdown` on `tx`.
pub async fn listen_for_signals(tx: watch::Sender<ShutdownSignal>) {
    tokio::select! {
        () = ctrl_c() => info!("Received Ctrl-C"),
        () = terminate() => info!("Received SIGTERM"),
    }
    if tx.send(ShutdownSignal::Shutdown).is_err() {
        debug!("server already stopped");
    }
}

/// Resolve once `rx` carries `Shutdown` or its sender is gone.
pub async fn shutdown_signal(mut rx: watch::Receiver<ShutdownSignal>) {
    loop {
        if *rx.borrow_and_update() == ShutdownSignal::Shutdown {
            info!("Received shutdown signal, stopping server...");
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Serve `router` until shutdown is requested on `rx`, then drain for at most
/// [`DRAIN_TIMEOUT`] before giving up on open connections.
pub async fn serve_until_shutdown(
    listener: TcpListener,
    router: Router,
    rx: watch::Receiver<ShutdownSignal>,
) -> io::Result<()> {
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(rx.clone()))
        .into_future();
    let deadline = async {
        shutdown_signal(rx).await;
        tokio::time::sleep(DRAIN_TIMEOUT).await;
    };
    tokio::select! {
        result = server => result,
        () = deadline => {
            warn!(timeout_secs = DRAIN_TIMEOUT.as_secs(), "Drain timed out, closing remaining connections");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_signal_resolves_on_send() {
        let (tx, rx) = watch::channel(ShutdownSignal::None);
        let waiter = tokio::spawn(shutdown_signal(rx));
        tx.send(ShutdownSignal::Shutdown).unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_signal_resolves_when_sender_dropped() {
        let (tx, rx) = watch::channel(ShutdownSignal::None);
        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), shutdown_signal(rx))
            .await
            .unwrap();
    }
}
