use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use student_records::{api, config::Config, create_pool, init_schema_or_log, Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config).context("invalid database configuration")?;
    tracing::info!(database = %config.database.connection_url(), "Using database");

    // Non-fatal: the table may already exist, and each request reports its own
    // connection failures.
    init_schema_or_log(&pool).await;

    let repo = Arc::new(Repository::new(pool));
    let app = api::create_router(api::AppState::new(repo));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
