use std::net::SocketAddr;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use venue_booking::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Held for the whole process so buffered log lines reach the file.
    let _log_guard = init_tracing(&config);

    info!("Starting Fyyur on {} ({})", config.app.host, config.app.environment);

    let app_state = AppState::connect(config.clone()).await?;
    let app = app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Stdout logging always; outside development also an `error.log` file sink.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let (file_layer, guard) = if config.app.is_development() {
        (None, None)
    } else {
        let appender = tracing_appender::rolling::never(&config.app.log_dir, "error.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(tracing_subscriber::filter::LevelFilter::INFO);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}
