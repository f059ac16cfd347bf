use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::cart::Cart;
use crate::entity::store_item::{self, Entity as StoreItem};
use crate::error::AppResult;

/// Read-only access to the `store` catalog.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    conn: DatabaseConnection,
}

impl StoreRepository {
    /// Creates a repository over the shared pool.
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Every store item, ordered by id.
    pub async fn all(&self) -> AppResult<Vec<store_item::Model>> {
        Ok(StoreItem::find()
            .order_by_asc(store_item::Column::Id)
            .all(&self.conn)
            .await?)
    }

    /// Store rows referenced by `cart`, in store order.
    ///
    /// An empty cart, or one holding only identifiers that cannot be store
    /// ids, returns no rows without running a query.
    pub async fn in_cart(&self, cart: &Cart) -> AppResult<Vec<store_item::Model>> {
        let ids: Vec<i32> = cart
            .items()
            .iter()
            .filter_map(|id| id.parse().ok())
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(StoreItem::find()
            .filter(store_item::Column::Id.is_in(ids))
            .order_by_asc(store_item::Column::Id)
            .all(&self.conn)
            .await?)
    }
}
