use clap::Parser;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use zkns_backend::config::{Args, Config};
use zkns_backend::http::metrics::{track_metrics, Metrics};
use zkns_backend::http::{router, AppState};
use zkns_backend::registry::ZkRegistryClient;
use zkns_backend::shutdown::{drain_with_deadline, wait_for_signal, RegistrySessionGuard};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    simple_logger::SimpleLogger::new()
        .with_level(args.log_level.to_level_filter())
        .init()
        .expect("logger already initialized");

    let config = match Config::from_args(args) {
        Ok(config) => {
            log::info!("Configuration: {:?}", config);
            config
        }
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            process::exit(1);
        }
    };

    let registry = match ZkRegistryClient::connect(&config.zk_connect_string, Duration::from_secs(10)) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            log::error!("Connecting to registry ensemble '{}': {:?}", config.zk_connect_string, err);
            process::exit(1);
        }
    };
    let registry: Arc<dyn zkns_backend::registry::RegistryClient> = registry;
    let _session_guard = RegistrySessionGuard::new(registry.clone());

    let drain_deadline = Duration::from_secs(config.drain_deadline_secs);
    let state = AppState { config: Arc::new(config.clone()), registry };
    let metrics = Arc::new(Metrics::new());

    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(serve_metrics))
        .with_state(metrics.clone());

    let app = router(state)
        .merge(metrics_router)
        .layer(axum::middleware::from_fn_with_state(metrics, track_metrics))
        .layer(tower_http::catch_panic::CatchPanicLayer::new());

    let listen_addr = std::net::SocketAddr::new(config.listen, config.port);
    let listener = match tokio::net::TcpListener::bind(listen_addr).await {
        Ok(listener) => {
            log::info!("Listening on {}.", listen_addr);
            listener
        }
        Err(err) => {
            log::error!("Binding {}: {}", listen_addr, err);
            process::exit(1);
        }
    };

    let serve = axum::serve(listener, app).with_graceful_shutdown(wait_for_signal());
    drain_with_deadline(async { serve.await.expect("server error") }, drain_deadline).await;

    log::info!("Shutdown complete.");
}

async fn serve_metrics(axum::extract::State(metrics): axum::extract::State<Arc<Metrics>>) -> String {
    metrics.render()
}
