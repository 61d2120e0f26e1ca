//! Graceful shutdown

use tokio::signal;

/// Resolves once the process is asked to stop
///
/// Listens to Ctrl+C and, on Unix, to SIGTERM. When a listener can not be installed the
/// other one is still waited on.
pub async fn handler() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Ctrl+C received"),
            Err(err) => {
                tracing::warn!("Could not listen for Ctrl+C: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::warn!("Could not listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Finishing in-flight requests before shutting down");
}
