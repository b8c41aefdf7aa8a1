use crate::registry::RegistryClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Waits for `SIGINT` or `SIGTERM`, whichever comes first. Used as the
/// graceful-shutdown trigger passed to `axum::serve(...).with_graceful_shutdown(...)`.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install SIGINT handler");
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
        _ = ctrl_c => log::info!("Received SIGINT, shutting down."),
        _ = terminate => log::info!("Received SIGTERM, shutting down."),
    }
}

/// Closes the registry client's session on drop, guaranteeing the close
/// call runs on every exit path (clean shutdown, drain timeout, or panic
/// unwind) — the "scoped acquisition" requirement from §5. Modeled on the
/// teacher's `ThreadPool`'s own `Drop` impl, which logs and joins on teardown.
pub struct RegistrySessionGuard(Arc<dyn RegistryClient>);

impl RegistrySessionGuard {
    pub fn new(registry: Arc<dyn RegistryClient>) -> Self {
        RegistrySessionGuard(registry)
    }
}

impl Drop for RegistrySessionGuard {
    fn drop(&mut self) {
        if let Err(err) = self.0.close() {
            log::error!("Closing registry session: {}", err);
        }
    }
}

/// Waits up to `deadline` for `drain` to complete, logging if it doesn't.
pub async fn drain_with_deadline<F>(drain: F, deadline: Duration)
where
    F: std::future::Future<Output = ()>,
{
    if tokio::time::timeout(deadline, drain).await.is_err() {
        log::warn!("Drain deadline of {:?} elapsed with requests still in flight.", deadline);
    }
}
