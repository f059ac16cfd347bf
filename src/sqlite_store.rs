use async_trait::async_trait;
use chrono::DateTime;
use sea_orm::prelude::DateTimeUtc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use time::OffsetDateTime;
use tower_sessions::{session::Id, session::Record, session_store, ExpiredDeletion, SessionStore};

use crate::entity::session::{self, ActiveModel as SessionActiveModel, Entity as SessionEntity};

/// A SQLite-backed session store for tower-sessions using Sea-ORM.
///
/// Sessions live in the `tower_sessions` table of the application database,
/// next to reviews and saved carts, so one file holds all persistent state.
/// Records are serialized with MessagePack.
///
/// # Error Handling
///
/// - Database errors → `session_store::Error::Backend`
/// - Serialization errors, or an expiry chrono cannot represent → `session_store::Error::Encode`
/// - Deserialization errors → `session_store::Error::Decode`
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: DatabaseConnection,
}

impl SqliteStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    /// Inserts a brand new record, regenerating its ID on collision.
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let txn = self
            .conn
            .begin()
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?;

        while SessionEntity::find_by_id(record.id.to_string())
            .one(&txn)
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?
            .is_some()
        {
            record.id = Id::default();
        }

        let session_model = to_active_model(record)?;
        session_model
            .insert(&txn)
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?;

        Ok(())
    }

    /// Upserts the record. Every sliding-expiry renewal lands here.
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let session_model = to_active_model(record)?;

        SessionEntity::insert(session_model)
            .on_conflict(
                OnConflict::column(session::Column::Id)
                    .update_columns([session::Column::Data, session::Column::ExpiryDate])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?;

        Ok(())
    }

    /// Loads a record that has not yet expired.
    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = to_chrono(OffsetDateTime::now_utc())?;

        let session = SessionEntity::find_by_id(session_id.to_string())
            .filter(session::Column::ExpiryDate.gt(now))
            .one(&self.conn)
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?;

        match session {
            Some(model) => {
                let record = rmp_serde::from_slice(&model.data)
                    .map_err(|e| session_store::Error::Decode(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        SessionEntity::delete_by_id(session_id.to_string())
            .exec(&self.conn)
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SqliteStore {
    /// Removes every record whose expiry has passed.
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = to_chrono(OffsetDateTime::now_utc())?;

        let result = SessionEntity::delete_many()
            .filter(session::Column::ExpiryDate.lte(now))
            .exec(&self.conn)
            .await
            .map_err(|e| session_store::Error::Backend(e.to_string()))?;

        tracing::debug!(removed = result.rows_affected, "expired sessions deleted");
        Ok(())
    }
}

fn to_active_model(record: &Record) -> session_store::Result<SessionActiveModel> {
    let data =
        rmp_serde::to_vec(record).map_err(|e| session_store::Error::Encode(e.to_string()))?;

    Ok(SessionActiveModel {
        id: Set(record.id.to_string()),
        data: Set(data),
        expiry_date: Set(to_chrono(record.expiry_date)?),
    })
}

// tower-sessions speaks `time`, the entity column speaks chrono.
fn to_chrono(time: OffsetDateTime) -> session_store::Result<DateTimeUtc> {
    DateTime::from_timestamp(time.unix_timestamp(), time.nanosecond()).ok_or_else(|| {
        session_store::Error::Encode(format!("expiry {} is out of range", time))
    })
}
