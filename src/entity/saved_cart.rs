//! Cart snapshot entity.

use sea_orm::entity::prelude::*;

/// A cart saved at logout so it can be restored on the next login.
///
/// Rows are append-only: every logout with a non-empty cart inserts a new
/// row, and a row stops being visible once `expiration_time` has passed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "temp_carts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owner of the snapshot. Never empty.
    pub user_name: String,

    /// JSON array of item identifiers, in cart order.
    #[sea_orm(column_type = "Text")]
    pub cart_data: String,

    pub expiration_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
