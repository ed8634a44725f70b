use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vacancy_tracker::{
    config::{get_config, init_config, Config, LogFormat},
    database::{
        pool::{create_pool, run_migrations},
        MemoryVacancyStore, PgVacancyStore, VacancyStore,
    },
    routes, AppState,
};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn VacancyStore>> {
    if config.database_url.is_none() {
        warn!("DATABASE_URL not set, using the in-memory store; data is lost on restart");
        return Ok(Arc::new(MemoryVacancyStore::new()));
    }

    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    info!("Connected to PostgreSQL and applied migrations");
    Ok(Arc::new(PgVacancyStore::new(pool)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    init_tracing(config.log_format);

    let store = build_store(config).await?;
    let app_state = AppState::new(store, &config.jwt_secret);

    let app = routes::router(app_state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
