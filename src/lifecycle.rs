//! Login and logout: the points where a cart moves between the session and
//! the database.

use tracing::{error, info};

use crate::cart::Cart;
use crate::carts::CartRepository;
use crate::error::{AppResult, ValidationError};
use crate::session::SessionContext;

/// Logs `username` in, restoring their saved cart when one is still live.
///
/// The name is kept exactly as given; a blank one is refused.
pub async fn login(session: &SessionContext, carts: &CartRepository, username: &str) -> AppResult<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingField.into());
    }

    let cart = carts.load_cart(username).await?.unwrap_or_default();
    info!(user = username, restored_items = cart.len(), "user logged in");
    session.begin(username, cart).await
}

/// Saves a non-empty cart for the logged-in user, then wipes the session.
///
/// The session is cleared even when reading it or saving the cart fails;
/// the failure is logged and the cart is lost.
pub async fn logout(session: &SessionContext, carts: &CartRepository) -> AppResult<()> {
    let cart = session.cart().await.unwrap_or_else(|e| {
        error!("could not read cart at logout: {}", e);
        Cart::default()
    });
    let identity = session.identity().await.unwrap_or_else(|e| {
        error!("could not read identity at logout: {}", e);
        None
    });

    if let Some(username) = identity.as_deref() {
        if !cart.is_empty() {
            if let Err(e) = carts.save_cart(&cart, username).await {
                error!(user = username, "could not save cart at logout: {}", e);
            }
        }
        info!(user = username, "user logged out");
    }

    session.clear().await
}
