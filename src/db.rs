//! Opening and closing the shared connection pool.

use sea_orm::{
    ConnAcquireErr, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
};
use tracing::{info, warn};

use crate::config::DatabaseSettings;

/// Opens a bounded pool against `settings.url`.
///
/// Handlers check a connection out per statement and hand it straight back;
/// nothing holds one across requests. SQLite is switched to WAL so readers
/// on other connections are not blocked by the single writer.
pub async fn connect(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(settings.url.clone());
    opt.max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .sqlx_logging(false);

    let conn = Database::connect(opt).await?;

    if !settings.url.contains(":memory:") {
        if let Err(e) = conn.execute_unprepared("PRAGMA journal_mode = WAL").await {
            warn!("could not enable WAL journal mode: {}", e);
        }
    }

    info!(
        max_connections = settings.max_connections,
        "database pool opened"
    );
    Ok(conn)
}

/// Whether `err` means no pooled connection came free within the acquire
/// timeout: the pool is saturated, or a checkout was never returned.
pub fn is_acquire_timeout(err: &DbErr) -> bool {
    matches!(err, DbErr::ConnectionAcquire(ConnAcquireErr::Timeout))
}

/// Closes the pool, waiting for checked-out connections to come back.
pub async fn close(conn: DatabaseConnection) {
    match conn.close().await {
        Ok(()) => info!("database pool closed"),
        Err(e) => warn!("database pool did not close cleanly: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_pool_opens_and_closes() {
        let conn = connect(&DatabaseSettings::in_memory()).await.unwrap();
        conn.execute_unprepared("SELECT 1").await.unwrap();
        close(conn).await;
    }

    #[tokio::test]
    async fn held_connection_surfaces_as_acquire_timeout() {
        use sea_orm::TransactionTrait;

        let settings = DatabaseSettings {
            acquire_timeout: std::time::Duration::from_millis(100),
            ..DatabaseSettings::in_memory()
        };
        let conn = connect(&settings).await.unwrap();

        // The only connection stays checked out by the open transaction.
        let txn = conn.begin().await.unwrap();
        let err = conn.execute_unprepared("SELECT 1").await.unwrap_err();
        assert!(is_acquire_timeout(&err), "unexpected error: {err}");

        txn.rollback().await.unwrap();
        conn.execute_unprepared("SELECT 1").await.unwrap();
    }

    #[test]
    fn only_timeouts_count_as_exhaustion() {
        assert!(is_acquire_timeout(&DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)));
        assert!(!is_acquire_timeout(&DbErr::ConnectionAcquire(
            ConnAcquireErr::ConnectionClosed
        )));
        assert!(!is_acquire_timeout(&DbErr::Custom("boom".into())));
    }
}
