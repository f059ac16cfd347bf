use dotenvy::dotenv;
use movie_reviews::{
    cleanup::spawn_cleanup_task, config::AppConfig, db, routes, AppState, CartRepository,
    MovieCatalog, SqliteStore,
};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(feature = "migration")]
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    dotenv().ok();

    let config = AppConfig::from_env()?;
    if config.session.uses_default_secret() {
        warn!("SESSION_SECRET_KEY is not set; session cookies are signed with a public default key. Set it before deploying.");
    }

    info!("Opening database: {}", config.database.url);
    let conn = db::connect(&config.database).await?;

    #[cfg(feature = "migration")]
    movie_reviews::migration::Migrator::up(&conn, None).await?;

    let session_store = SqliteStore::new(conn.clone());
    let cleanup = spawn_cleanup_task(
        session_store.clone(),
        CartRepository::new(conn.clone()),
        config.cleanup_interval,
    );

    let state = AppState::new(conn.clone(), MovieCatalog::default());
    let app = routes::app(state, session_store, &config.session);

    info!("Server starting on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    cleanup.abort();
    db::close(conn).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("could not listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
