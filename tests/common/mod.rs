//! Shared harness for driving the router in-process.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use movie_reviews::{
    config::{DatabaseSettings, SessionSettings},
    db,
    entity::store_item,
    migration::{Migrator, MigratorTrait},
    routes, AppState, MovieCatalog, SessionStore,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::ServiceExt;

pub struct TestApp {
    pub conn: DatabaseConnection,
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// App over a migrated in-memory database with three store items.
    pub async fn new<S: SessionStore + Clone>(make_store: impl FnOnce(DatabaseConnection) -> S) -> Self {
        let conn = db::connect(&DatabaseSettings::in_memory())
            .await
            .expect("open database");
        Migrator::up(&conn, None).await.expect("migrate");

        for (id, title, price) in [(1, "Popcorn", 3.5), (2, "Poster", 12.0), (3, "Blu-ray", 19.99)] {
            store_item::ActiveModel {
                id: Set(id),
                title: Set(title.to_string()),
                price: Set(price),
            }
            .insert(&conn)
            .await
            .expect("seed store");
        }

        let state = AppState::new(conn.clone(), MovieCatalog::default());
        let router = routes::app(state, make_store(conn.clone()), &SessionSettings::new("test secret"));

        Self {
            conn,
            router,
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// A POST carrying `body` with no `Content-Type` header at all.
    pub async fn post_untyped(&mut self, uri: &str, body: &str) -> Response<Body> {
        let request = self
            .request("POST", uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self.router.clone().oneshot(request).await.unwrap();

        // Keep the session cookie like a browser would; an empty value is
        // the removal cookie sent after a flush.
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            let has_value = pair.split_once('=').is_some_and(|(_, v)| !v.is_empty());
            self.cookie = has_value.then_some(pair);
        }
        response
    }
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], to);
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
