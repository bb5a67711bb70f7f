use crate::{
    cmd::load_config,
    modules::handlers::{
        all_contests, codechef_contests, codeforces_contests, handle_panic, index,
        leetcode_contests, liveness,
    },
};
use anyhow::{Context, Result};
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use contest_aggregator_libs::ContestAggregator;
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let config = load_config()?;
    let aggregator = ContestAggregator::new(&config).with_context(|| {
        let message = "couldn't create HTTP client for contest providers.";
        tracing::error!(message);
        message
    })?;

    let port = match args.port {
        Some(port) => port,
        None => match env::var("PORT") {
            Ok(port) => port.parse::<u16>().with_context(|| {
                let message = format!("PORT must be a valid port number, but got `{}`", port);
                tracing::error!(message);
                message
            })?,
            Err(_) => {
                tracing::warn!(
                    "PORT environment variable is not set. API server will be launched at default port number {}",
                    DEFAULT_PORT
                );
                DEFAULT_PORT
            }
        },
    };

    let app = create_router(aggregator);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::try_bind(&addr)
        .with_context(|| {
            let message = format!("failed to bind server to port {}", port);
            tracing::error!(message);
            message
        })?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

pub fn create_router(aggregator: ContestAggregator) -> Router {
    Router::new()
        .route("/", routing::get(index))
        .route("/contests", routing::get(all_contests))
        .route("/contests/codeforces", routing::get(codeforces_contests))
        .route("/contests/leetcode", routing::get(leetcode_contests))
        .route("/contests/codechef", routing::get(codechef_contests))
        .route("/health", routing::get(liveness))
        .layer(Extension(Arc::new(aggregator)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, starting graceful shutdown.");
}
