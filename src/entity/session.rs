//! Session record entity backing [`SqliteStore`](crate::SqliteStore).

use sea_orm::entity::prelude::*;

/// A persisted `tower-sessions` record.
///
/// | Column      | Type              | Description                          |
/// |-------------|-------------------|--------------------------------------|
/// | id          | TEXT (Primary Key) | Session ID                          |
/// | data        | BLOB              | MessagePack serialized record        |
/// | expiry_date | TEXT (UTC)        | Expiration of the session            |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tower_sessions")]
pub struct Model {
    /// String form of `tower_sessions::session::Id`.
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    /// MessagePack encoding of the whole `Record`, expiry included.
    pub data: Vec<u8>,

    /// Rows at or past this instant are never loaded and get swept by
    /// `delete_expired`.
    pub expiry_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
