//! # Movie Reviews
//!
//! A small movie-review site built on [axum](https://crates.io/crates/axum),
//! [`tower-sessions`](https://crates.io/crates/tower-sessions) and
//! [Sea-ORM](https://crates.io/crates/sea-orm) over a single SQLite file.
//!
//! Users log in with a name, review movies from a fixed catalog and collect
//! store items in a cart. The cart lives in the session while browsing; on
//! logout it is written to the `temp_carts` table and on the next login
//! (within 72 hours) it is put back.
//!
//! ## Features
//!
//! - Server-side sessions stored in SQLite through [`SqliteStore`], with
//!   signed cookies and a sliding 72 hour expiry
//! - Cart snapshots serialized as JSON and decoded strictly
//! - Review validation against an injected [`MovieCatalog`]
//! - Periodic sweeping of expired sessions and carts
//!
//! ## Quick Start
//!
//! ```no_run
//! use movie_reviews::{config::AppConfig, db, routes, AppState, MovieCatalog, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let conn = db::connect(&config.database).await?;
//!
//! let state = AppState::new(conn.clone(), MovieCatalog::default());
//! let app = routes::app(state, SqliteStore::new(conn), &config.session);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Swapping the session store
//!
//! Anything implementing [`SessionStore`] works, which is how the tests run
//! without a session table:
//!
//! ```no_run
//! use movie_reviews::{config::SessionSettings, routes, AppState, MovieCatalog};
//! use tower_sessions::MemoryStore;
//!
//! # fn example(conn: sea_orm::DatabaseConnection) {
//! let state = AppState::new(conn, MovieCatalog::default());
//! let app = routes::app(state, MemoryStore::default(), &SessionSettings::new("test secret"));
//! # }
//! ```

pub mod cart;
pub mod carts;
pub mod catalog;
pub mod cleanup;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod lifecycle;
#[cfg(feature = "migration")]
pub mod migration;
pub mod reviews;
pub mod routes;
pub mod session;
mod sqlite_store;
pub mod state;
pub mod store_items;
pub mod views;

#[cfg(test)]
mod test_support;

pub use cart::Cart;
pub use carts::CartRepository;
pub use catalog::MovieCatalog;
pub use error::{AppError, ValidationError};
pub use session::SessionContext;
pub use state::AppState;

/// The SQLite session store used in production.
pub use sqlite_store::SqliteStore;

/// Re-exported from `tower-sessions` for convenience.
pub use tower_sessions::{ExpiredDeletion, SessionStore};
