use anyhow::{Context, Result};
use recipe_analyzer::cli::parse_args;
use recipe_analyzer::config::AppConfig;
use recipe_analyzer::server::router;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for the API key

    init_logging();
    let config = AppConfig::from_cli(parse_args());

    if config.ai_enabled() {
        tracing::info!(model = %config.generation.model, "AI recipe generation enabled");
    } else {
        tracing::warn!("No OpenAI API key found, serving fallback recipes only");
    }

    let analyzer = config
        .build_analyzer()
        .context("Failed to initialize the recipe generator")?;
    let app = router(analyzer, &config.allowed_origins);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
