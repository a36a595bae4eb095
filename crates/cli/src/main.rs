//! chacra — webhook relay server.
//!
//! Serves the push-path webhook surface. The long-running session
//! bridge lives in `chacra-bridge` and is embedded by whatever process
//! owns the actual chat transport.

use std::{net::SocketAddr, sync::Arc};

use {
    anyhow::Context,
    clap::Parser,
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
    url::Url,
};

use {
    chacra_backend::BackendClient,
    chacra_webhook::{WebhookState, webhook_router},
};

#[derive(Parser)]
#[command(name = "chacra", about = "chacra — WhatsApp ↔ agent backend relay")]
struct Cli {
    /// Agent backend base URL. When unset, webhook deliveries answer
    /// HTTP 500 instead of being forwarded.
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<Url>,

    /// Webhook subscription verification secret.
    #[arg(long, env = "WEBHOOK_VERIFY_TOKEN", default_value = "default_token")]
    verify_token: String,

    /// App secret for X-Hub-Signature-256 validation. Bodies are
    /// accepted unsigned when unset.
    #[arg(long, env = "WEBHOOK_APP_SECRET")]
    app_secret: Option<String>,

    /// Role tag applied to inbound messages that carry none.
    #[arg(long, env = "DEFAULT_ROLE", default_value = "formulario")]
    default_role: String,

    /// Address to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    let backend = match cli.backend_url {
        Some(url) => {
            info!(backend = %url, "forwarding to agent backend");
            Some(Arc::new(BackendClient::new(url)?))
        },
        None => {
            warn!("BACKEND_URL not set; deliveries will answer HTTP 500");
            None
        },
    };

    let mut state = WebhookState::new(backend, cli.verify_token.clone(), cli.default_role.clone());
    if let Some(ref secret) = cli.app_secret {
        state = state.with_app_secret(secret.clone());
    }

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "webhook server listening");

    axum::serve(listener, webhook_router().with_state(state))
        .await
        .context("webhook server error")?;

    Ok(())
}
