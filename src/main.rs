mod clients;
mod config;
mod dashboard;
mod helpers;
mod models;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use clients::BackendClient;
use dashboard::DashboardController;
use dashboard::regions::Regions;

pub type Controller = DashboardController<BackendClient>;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
    pub config: Arc<config::Config>,
    /// Cancelled on shutdown so long-lived event streams end.
    pub shutdown: CancellationToken,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zeroday_console=info,tower_http=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = args
        .windows(2)
        .find_map(|w| {
            if w[0] == "-config" || w[0] == "--config" {
                Some(w[1].clone())
            } else {
                None
            }
        })
        .or_else(|| args.first().filter(|a| !a.starts_with('-')).cloned())
        .unwrap_or_else(|| "/etc/zeroday-console/config.yaml".to_string());

    let cfg = config::Config::load(&PathBuf::from(&config_path)).unwrap_or_else(|e| {
        eprintln!("error loading config: {}", e);
        std::process::exit(1);
    });

    let client = BackendClient::new(&cfg.backend_url, cfg.request_timeout()).unwrap_or_else(|e| {
        eprintln!("error creating backend client: {}", e);
        std::process::exit(1);
    });

    let controller = Arc::new(DashboardController::new(
        Arc::new(client),
        Arc::new(Regions::new()),
        cfg.refresh_interval(),
        cfg.display_timezone,
    ));
    let cfg = Arc::new(cfg);

    controller.start().await;

    let shutdown = CancellationToken::new();
    let state = AppState {
        controller: controller.clone(),
        config: cfg.clone(),
        shutdown: shutdown.clone(),
    };

    let router = routes::build_router(state);

    let listen_addr = cfg.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await.unwrap_or_else(|e| {
        eprintln!("failed to bind {}: {}", listen_addr, e);
        std::process::exit(1);
    });

    info!(backend = %cfg.backend_url, "zeroday-console listening on {}", listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown.cancel();
        })
        .await
        .unwrap_or_else(|e| {
            eprintln!("server error: {}", e);
            std::process::exit(1);
        });

    controller.stop().await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
