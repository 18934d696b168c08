use std::net::SocketAddr;
use tracing::{error, info};

mod access_log;
mod api;
mod app_state;
mod bootstrap;
mod evolution;
mod mock;
mod openapi;
mod process;
mod random;
mod request_ctx;
mod responses;
mod security;
#[cfg(test)]
mod test_support;
mod util;

mod router;

pub(crate) use app_state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    match bootstrap::ensure_openapi_export() {
        Ok(Some(_)) => return,
        Ok(None) => {}
        Err(err) => {
            eprintln!("error: failed to write generated OPENAPI_OUT: {err}");
            std::process::exit(2);
        }
    }

    seed_otel::init();

    let cfg = match bootstrap::server_config_from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let state = AppState::builder(random::from_env())
        .with_dev_mode(cfg.dev_mode)
        .build();
    let app = bootstrap::build_app(state, &cfg);

    let listener = match tokio::net::TcpListener::bind(cfg.addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %cfg.addr, "bind server socket: {err}");
            std::process::exit(1);
        }
    };
    info!(
        addr = %cfg.addr,
        dev_mode = cfg.dev_mode,
        frontend = ?cfg.frontend_origin,
        "AI-Seed API listening"
    );

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        error!("http server exited with error: {err}");
    }
    info!("server stopped");
}

async fn shutdown_signal() {
    info!("shutdown signal listener active");
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                error!("install SIGTERM handler: {err}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
}
