//! Graceful shutdown handling.
//!
//! Provides signal handling for clean server shutdown.

use tokio::{signal, sync::watch};

/// Wait for a shutdown signal (Ctrl-C or SIGTERM).
///
/// On Unix systems, it also handles SIGTERM for container environments.
#[allow(clippy::expect_used)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}

/// Returns a receiver that flips to `true` once `trigger` completes.
///
/// Pass [`shutdown_signal`] as the trigger in the binary, or any future in
/// tests.
pub fn shutdown_channel<F>(trigger: F) -> watch::Receiver<bool>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        trigger.await;
        let _ = shutdown_tx.send(true);
    });
    shutdown_rx
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn test_shutdown_channel_flips_after_trigger() {
        let (fire_tx, fire_rx) = oneshot::channel::<()>();
        let mut rx = shutdown_channel(async move {
            let _ = fire_rx.await;
        });
        assert!(!*rx.borrow());

        fire_tx.send(()).ok();
        let result = tokio::time::timeout(Duration::from_secs(1), rx.wait_for(|v| *v)).await;
        assert!(matches!(result, Ok(Ok(_))), "should receive shutdown signal");
    }
}
