//! Sea-ORM entity definitions for the movie-reviews database.
//!
//! Every table the application touches lives in a single SQLite file:
//! submitted reviews, the store catalog, expiring cart snapshots and the
//! server-side session records.

/// Submitted movie reviews (`movies` table).
pub mod review;

/// Expiring cart snapshots written at logout (`temp_carts` table).
pub mod saved_cart;

/// Server-side session records (`tower_sessions` table).
pub mod session;

/// Externally seeded store catalog (`store` table).
pub mod store_item;
