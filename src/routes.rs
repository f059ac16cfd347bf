//! HTTP routes.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tracing::debug;

use crate::config::SessionSettings;
use crate::error::{AppResult, ValidationError};
use crate::lifecycle;
use crate::reviews::ReviewForm;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub id: String,
}

/// All routes, without the session layer.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_form).post(login))
        .route("/submit", post(submit))
        .route("/submitted", get(submitted))
        .route("/movies", get(movies))
        .route("/cart", get(cart).post(add_to_cart))
        .route("/logout", get(logout))
        .with_state(state)
}

/// The full application: routes plus signed, sliding-expiry sessions kept
/// in `store`.
pub fn app<S>(state: AppState, store: S, settings: &SessionSettings) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(settings.secure)
        .with_expiry(Expiry::OnInactivity(settings.lifetime))
        .with_signed(settings.signing_key());

    create_router(state).layer(session_layer)
}

async fn index(State(state): State<AppState>, session: SessionContext) -> AppResult<Html<String>> {
    let user = session.require_identity().await?;
    debug!(user = %user, "index");
    Ok(views::index(&state.catalog))
}

async fn login_form() -> Html<String> {
    views::login()
}

async fn login(
    State(state): State<AppState>,
    session: SessionContext,
    Form(form): Form<LoginForm>,
) -> AppResult<Redirect> {
    lifecycle::login(&session, &state.carts, &form.username).await?;
    Ok(Redirect::to("/"))
}

async fn submit(
    State(state): State<AppState>,
    session: SessionContext,
    form: Result<Form<ReviewForm>, FormRejection>,
) -> AppResult<Redirect> {
    // Identity first: anonymous posts redirect whatever their body looks like.
    session.require_identity().await?;
    let Form(form) = form.map_err(|e| {
        debug!("unreadable review form: {}", e);
        ValidationError::MissingField
    })?;
    state.reviews.submit(form, &state.catalog).await?;
    Ok(Redirect::to("/submitted"))
}

async fn submitted(State(state): State<AppState>) -> AppResult<Html<String>> {
    let reviews = state.reviews.all().await?;
    Ok(views::submitted(&reviews))
}

async fn movies(State(state): State<AppState>) -> AppResult<Html<String>> {
    let items = state.store.all().await?;
    Ok(views::movies(&items))
}

async fn cart(State(state): State<AppState>, session: SessionContext) -> AppResult<impl IntoResponse> {
    let cart = session.cart().await?;
    let items = state.store.in_cart(&cart).await?;
    Ok(views::cart(&items))
}

async fn add_to_cart(session: SessionContext, Form(form): Form<AddToCartForm>) -> AppResult<Redirect> {
    let id = form.id.trim();
    if !id.is_empty() {
        session.add_to_cart(id).await?;
    }
    Ok(Redirect::to("/cart"))
}

async fn logout(State(state): State<AppState>, session: SessionContext) -> AppResult<Redirect> {
    lifecycle::logout(&session, &state.carts).await?;
    Ok(Redirect::to("/login"))
}
