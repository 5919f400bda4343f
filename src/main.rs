use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, EnvFilter};

use portfolio_frontend::{
    graceful_shutdown::shutdown_signal,
    routes::{configure_dev_proxy, configure_routes},
    settings::AppConfig,
    AppState,
};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,portfolio_frontend=debug"));

    if config.is_production() {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Failed to load configuration")?;
    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let app_state = web::Data::new(
        AppState::new(&config).context("Failed to build backend client")?
    );

    let server_addr = format!("{}:{}", config.host, config.port);
    let dev_proxy = !config.is_production();
    let upload_max_bytes = config.upload_max_bytes;

    tracing::info!(
        "🚀 Starting {} v{} on {} (backend {})",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.api_base_url
    );
    if dev_proxy {
        tracing::info!("Proxying /api/* to {}", config.api_base_url);
    }

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .configure(|cfg| {
                if dev_proxy {
                    configure_dev_proxy(cfg, upload_max_bytes);
                }
            })
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => res.context("Server error")?,
        reason = shutdown_signal() => {
            tracing::info!(?reason, "Shutting down");
            handle.stop(true).await;
        }
    }

    Ok(())
}
