use sea_orm::DatabaseConnection;

use crate::carts::CartRepository;
use crate::catalog::MovieCatalog;
use crate::reviews::ReviewRepository;
use crate::store_items::StoreRepository;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: MovieCatalog,
    pub carts: CartRepository,
    pub reviews: ReviewRepository,
    pub store: StoreRepository,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, catalog: MovieCatalog) -> Self {
        Self {
            catalog,
            carts: CartRepository::new(conn.clone()),
            reviews: ReviewRepository::new(conn.clone()),
            store: StoreRepository::new(conn),
        }
    }
}
