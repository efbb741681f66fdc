use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::Router;
use configs::{AppConfig, ServerConfig};
use service::{CarRepository, SeaOrmCarRepository};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::routes::{self, API_PREFIX};
use crate::state::AppState;

/// Router over any storage adapter, configured from `[server]`.
pub fn build_app(repo: Arc<dyn CarRepository>, server: &ServerConfig) -> Router {
    routes::build_router(AppState::new(repo, server))
}

/// Public entry: connect the store, then serve until a shutdown signal.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .context("cannot connect to the database")?;
    if cfg.database.create_schema {
        models::db::ensure_schema(&db)
            .await
            .context("cannot create the car_model table")?;
        info!(service = "server", event = "schema_ready", "car_model table ensured");
    }

    let repo: Arc<dyn CarRepository> = Arc::new(SeaOrmCarRepository::new(db));
    let app = build_app(Arc::clone(&repo), &cfg.server);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(service = "server", event = "listening", %addr, prefix = API_PREFIX, "car inventory server listening");

    let served = serve_with_shutdown(listener, app, shutdown_signal(), cfg.server.shutdown_timeout()).await;

    if let Err(e) = repo.close().await {
        warn!(service = "server", event = "close_failed", error = %e, "closing the repository failed");
    }
    info!(service = "server", event = "stopped", "server stopped");
    served
}

/// Serve `app` until `signal` resolves, then let in-flight requests finish
/// for at most `drain` before dropping them.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.wait_for(|stop| *stop).await;
            })
            .await
    });

    tokio::select! {
        res = &mut server => return joined(res),
        _ = signal => {
            info!(service = "server", event = "shutdown", drain_secs = drain.as_secs(), "shutdown signal received, draining");
        }
    }

    stop_tx.send_replace(true);
    match tokio::time::timeout(drain, &mut server).await {
        Ok(res) => joined(res),
        Err(_) => {
            warn!(service = "server", event = "drain_timeout", "drain timeout elapsed, dropping remaining connections");
            server.abort();
            Ok(())
        }
    }
}

fn joined(res: Result<std::io::Result<()>, JoinError>) -> anyhow::Result<()> {
    res.context("server task failed")?.context("server error")?;
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "cannot listen for ctrl_c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "cannot listen for SIGTERM");
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
