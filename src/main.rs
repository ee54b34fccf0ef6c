use std::net::SocketAddr;
use std::sync::Arc;

use recruitease_backend::{
    config::{get_config, init_config, LogFormat},
    database::pool::{create_pool, run_migrations},
    routes::build_router,
    store::{MemoryRecordStore, MemorySessionStore, PgRecordStore, RecordStore},
    AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let records: Arc<dyn RecordStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            info!("Using Postgres record store");
            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set; jobs and applications are kept in memory only");
            Arc::new(MemoryRecordStore::new())
        }
    };
    let sessions = Arc::new(MemorySessionStore::new(config.session_ttl()));

    let app_state = AppState::new(config.clone(), records, sessions)?;
    app_state.uploads.ensure_dirs().await?;
    info!("Serving uploads from: {}", config.uploads_dir.display());

    let app = build_router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
