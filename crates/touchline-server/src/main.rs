// Touchline entry point.
//
// Startup sequence:
// 1. Initialize tracing (stdout)
// 2. Load config and the upstream API key
// 3. Build the completion client
// 4. Bind the listener and serve until Ctrl+C / SIGTERM

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use touchline_server::config;
use touchline_server::handler::AppState;
use touchline_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Touchline starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: model={}, prompt mode={}, upstream={}",
        config.llm.model, config.prompt.mode, config.llm.base_url
    );

    if config
        .credentials
        .openai_api_key
        .as_deref()
        .map_or(true, str::is_empty)
    {
        warn!(
            "{} is not set; completion calls will fail upstream authentication",
            config::API_KEY_ENV
        );
    }

    // 3. Build the completion client
    let state = AppState::from_config(&config).context("failed to build completion client")?;

    // 4. Bind and serve
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    info!("Listening on {}", listener.local_addr()?);

    server::serve(listener, state, server::shutdown_signal())
        .await
        .context("server error")?;

    info!("Touchline shut down cleanly");
    Ok(())
}

/// Initialize tracing to stdout, filtered by `RUST_LOG`.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("touchline=info,tower_http=info,warn")
            }),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
