use std::time::Duration;

use tokio::task::JoinHandle;
use tower_sessions::ExpiredDeletion;
use tracing::{debug, warn};

use crate::carts::CartRepository;

/// Periodically deletes expired session records and saved carts.
///
/// Reads already ignore expired rows; this only keeps the tables from
/// growing without bound. Failures are logged and retried next tick.
pub fn spawn_cleanup_task<S>(sessions: S, carts: CartRepository, period: Duration) -> JoinHandle<()>
where
    S: ExpiredDeletion,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;

            if let Err(e) = sessions.delete_expired().await {
                warn!("expired session cleanup failed: {}", e);
            }
            match carts.prune_expired().await {
                Ok(removed) => debug!(removed, "expired carts pruned"),
                Err(e) => warn!("expired cart cleanup failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};
    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;
    use crate::cart::Cart;
    use crate::entity::saved_cart::Entity as SavedCart;
    use crate::test_support::migrated_db;
    use crate::SqliteStore;

    #[tokio::test]
    async fn first_tick_prunes_expired_carts() {
        let conn = migrated_db().await;
        let carts = CartRepository::new(conn.clone());
        let cart: Cart = ["1"].into_iter().collect();
        let stale = Utc::now() - carts.retention() - ChronoDuration::minutes(1);
        carts.save_cart_at(&cart, "alice", stale).await.unwrap();

        let handle = spawn_cleanup_task(
            SqliteStore::new(conn.clone()),
            carts,
            Duration::from_secs(3600),
        );
        for _ in 0..50 {
            if SavedCart::find().count(&conn).await.unwrap() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        handle.abort();

        assert_eq!(SavedCart::find().count(&conn).await.unwrap(), 0);
    }
}
