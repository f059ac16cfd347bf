//! Typed access to the per-client session.

use axum::{extract::FromRequestParts, http::request::Parts, http::StatusCode};
use tower_sessions::Session;

use crate::cart::Cart;
use crate::error::{AppError, AppResult};

const IDENTITY_KEY: &str = "name";
const CART_KEY: &str = "cart";

/// The current client's session, handed to every handler that needs it.
///
/// Wraps [`tower_sessions::Session`] so handlers deal in usernames and
/// [`Cart`]s instead of raw keys. The backing store is whatever the
/// `SessionManagerLayer` was built with.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The logged-in username. An empty stored name counts as logged out.
    pub async fn identity(&self) -> AppResult<Option<String>> {
        let name: Option<String> = self.session.get(IDENTITY_KEY).await?;
        Ok(name.filter(|n| !n.is_empty()))
    }

    /// Like [`identity`](Self::identity) but fails with
    /// [`AppError::Unauthenticated`] when nobody is logged in.
    pub async fn require_identity(&self) -> AppResult<String> {
        self.identity().await?.ok_or(AppError::Unauthenticated)
    }

    pub async fn cart(&self) -> AppResult<Cart> {
        Ok(self.session.get(CART_KEY).await?.unwrap_or_default())
    }

    /// Starts a logged-in session for `username` holding `cart`.
    pub async fn begin(&self, username: &str, cart: Cart) -> AppResult<()> {
        self.session.insert(IDENTITY_KEY, username).await?;
        self.session.insert(CART_KEY, cart).await?;
        Ok(())
    }

    /// Adds `item` to the cart and persists the session right away.
    /// Returns whether the cart changed.
    pub async fn add_to_cart(&self, item: &str) -> AppResult<bool> {
        let mut cart = self.cart().await?;
        let added = cart.add(item);
        if added {
            self.session.insert(CART_KEY, cart).await?;
            self.session.save().await?;
        }
        Ok(added)
    }

    /// Drops every key and deletes the stored record.
    pub async fn clear(&self) -> AppResult<()> {
        self.session.flush().await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_session;

    #[tokio::test]
    async fn fresh_session_is_anonymous_with_empty_cart() {
        let ctx = memory_session();
        assert_eq!(ctx.identity().await.unwrap(), None);
        assert!(ctx.cart().await.unwrap().is_empty());
        assert!(matches!(
            ctx.require_identity().await,
            Err(AppError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn add_to_cart_dedups() {
        let ctx = memory_session();
        assert!(ctx.add_to_cart("3").await.unwrap());
        assert!(!ctx.add_to_cart("3").await.unwrap());
        assert_eq!(ctx.cart().await.unwrap().items(), ["3"]);
    }

    #[tokio::test]
    async fn clear_forgets_everything() {
        let ctx = memory_session();
        let cart: Cart = ["1"].into_iter().collect();
        ctx.begin("alice", cart).await.unwrap();
        assert_eq!(ctx.identity().await.unwrap().as_deref(), Some("alice"));

        ctx.clear().await.unwrap();
        assert_eq!(ctx.identity().await.unwrap(), None);
        assert!(ctx.cart().await.unwrap().is_empty());
    }
}
