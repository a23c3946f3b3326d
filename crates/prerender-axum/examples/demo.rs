//! Minimal host application with the prerender middleware in front.
//!
//! Configure the rendering service via PRERENDER_SERVICE_URL,
//! PRERENDER_SERVICE_USERNAME, PRERENDER_SERVICE_PASSWORD and
//! PRERENDER_SERVICE_TOKEN, then:
//!
//! ```sh
//! cargo run -p prerender-axum --example demo
//! curl -H 'User-Agent: googlebot' http://localhost:3000/
//! ```

use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::{Router, middleware};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use prerender_axum::{PrerenderState, prerender_middleware};
use prerender_client::ReqwestRenderFetcher;
use prerender_core::{ClassifierConfig, NoopHooks, RenderService, UpstreamConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("prerender=info".parse()?))
        .with_target(false)
        .init();

    let fetcher = ReqwestRenderFetcher::new(UpstreamConfig::from_env())?;
    let state = Arc::new(PrerenderState {
        classifier: ClassifierConfig::new(),
        service: RenderService::<_, NoopHooks>::new(fetcher),
    });

    let app = Router::new()
        .route("/", get(index))
        .layer(middleware::from_fn_with_state(
            state,
            prerender_middleware::<ReqwestRenderFetcher, NoopHooks>,
        ))
        .layer(TraceLayer::new_for_http());

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    tracing::info!("Starting demo app on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html("<html><body><div id=\"app\">rendered client-side</div></body></html>")
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
