mod config;
mod credential;
mod llm;
mod prompt;
mod routes;
mod selection;
mod services;
mod session;
mod state;
mod views;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "lore_ipsum=info,tower_http=info";

#[tokio::main]
async fn main() {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let llm = llm::GeminiClient::new(&config.llm).expect("HTTP client init failed");
    tracing::info!(model = %config.llm.model, endpoint = llm.endpoint(), "gemini client initialized");

    let secrets = credential::TomlSecrets::new(config.secrets_path.clone());
    let state = state::AppState::new(Arc::new(llm), Arc::new(secrets), config.cookie_secure);

    if state.resolve_credential().is_some() {
        tracing::info!("API key resolved; manual key entry disabled");
    } else {
        tracing::warn!(
            secrets_path = %config.secrets_path.display(),
            "no {} found in secrets file or environment; users must enter a key",
            credential::KEY_NAME
        );
    }

    let _sweeper = session::spawn_session_sweeper(state.sessions.clone(), config.session_idle);

    let app = routes::app(state);
    let listen_addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .expect("failed to bind");

    tracing::info!(addr = %listen_addr, "lore ipsum listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
