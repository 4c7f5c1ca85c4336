use clap::Parser;
use figment::{Figment, providers::Env};
use offweb::cli::Args;
use offweb::config::Config;
use offweb::logging::setup_logging;
use offweb::state::AppState;
use offweb::unipa::UnipaClient;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load config and setup logging first so startup logs are never silently dropped
    let config: Config = match Figment::new().merge(Env::raw()).extract() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting offweb"
    );

    let unipa = match UnipaClient::with_search_url(
        config.unipa_search_url.clone(),
        Duration::from_secs(config.upstream_timeout),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = ?e, "Failed to build catalog client");
            return ExitCode::FAILURE;
        }
    };

    let router = offweb::web::create_router(AppState::new(unipa));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = ?e, port = config.port, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %addr, "web server listening");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = ?e, "web server exited with error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Resolves on SIGINT or SIGTERM so in-flight requests drain before exit.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}
