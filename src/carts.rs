//! Saving carts at logout and restoring them at login.

use chrono::{Duration, Utc};
use sea_orm::prelude::DateTimeUtc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::cart::Cart;
use crate::config::RETENTION_MINUTES;
use crate::entity::saved_cart::{self, ActiveModel as SavedCartActiveModel, Entity as SavedCart};
use crate::error::{AppError, AppResult};

/// Access to the `temp_carts` table.
#[derive(Debug, Clone)]
pub struct CartRepository {
    conn: DatabaseConnection,
    retention: Duration,
}

impl CartRepository {
    /// Creates a repository keeping snapshots for the standard retention
    /// window.
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            retention: Duration::minutes(RETENTION_MINUTES),
        }
    }

    /// How long a saved cart stays retrievable.
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Stores a snapshot of `cart` for `username`, retrievable for the
    /// retention window.
    ///
    /// Fails with [`AppError::RequiresUsername`] without touching the
    /// database when `username` is empty. Each call adds a row; earlier
    /// snapshots are left in place.
    pub async fn save_cart(&self, cart: &Cart, username: &str) -> AppResult<()> {
        self.save_cart_at(cart, username, Utc::now()).await
    }

    /// [`save_cart`](Self::save_cart) with an explicit "now".
    pub async fn save_cart_at(&self, cart: &Cart, username: &str, now: DateTimeUtc) -> AppResult<()> {
        if username.is_empty() {
            return Err(AppError::RequiresUsername);
        }

        let row = SavedCartActiveModel {
            id: NotSet,
            user_name: Set(username.to_string()),
            cart_data: Set(cart.to_json()?),
            expiration_time: Set(now + self.retention),
        };
        row.insert(&self.conn).await?;

        debug!(user = username, items = cart.len(), "cart saved");
        Ok(())
    }

    /// The user's live saved cart, if any.
    ///
    /// When several snapshots are still live the most recently saved one
    /// (latest expiration) wins.
    pub async fn load_cart(&self, username: &str) -> AppResult<Option<Cart>> {
        self.load_cart_at(username, Utc::now()).await
    }

    /// [`load_cart`](Self::load_cart) with an explicit "now".
    pub async fn load_cart_at(&self, username: &str, now: DateTimeUtc) -> AppResult<Option<Cart>> {
        let row = SavedCart::find()
            .filter(saved_cart::Column::ExpirationTime.gt(now))
            .filter(saved_cart::Column::UserName.eq(username))
            .order_by_desc(saved_cart::Column::ExpirationTime)
            .order_by_desc(saved_cart::Column::Id)
            .one(&self.conn)
            .await?;

        match row {
            Some(model) => Ok(Some(Cart::from_json(&model.cart_data)?)),
            None => Ok(None),
        }
    }

    /// Deletes snapshots whose expiration has passed. Returns how many went.
    pub async fn prune_expired(&self) -> AppResult<u64> {
        self.prune_expired_at(Utc::now()).await
    }

    /// [`prune_expired`](Self::prune_expired) with an explicit "now".
    pub async fn prune_expired_at(&self, now: DateTimeUtc) -> AppResult<u64> {
        let result = SavedCart::delete_many()
            .filter(saved_cart::Column::ExpirationTime.lte(now))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
