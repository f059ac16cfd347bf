use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tower_sessions::{MemoryStore, Session};

use crate::config::DatabaseSettings;
use crate::migration::Migrator;
use crate::session::SessionContext;

/// A fresh in-memory database with the full schema.
pub(crate) async fn migrated_db() -> DatabaseConnection {
    let conn = crate::db::connect(&DatabaseSettings::in_memory())
        .await
        .expect("open in-memory database");
    Migrator::up(&conn, None).await.expect("run migrations");
    conn
}

/// A bare `tower_sessions::Session` for writing arbitrary keys.
pub(crate) fn raw_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

/// A session that is not attached to any request.
pub(crate) fn memory_session() -> SessionContext {
    SessionContext::new(raw_session())
}
