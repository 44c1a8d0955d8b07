use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn app(state: AppState, allowed_origin: HeaderValue) -> Router {
    // Credentials mode: the session cookie must survive cross-site requests
    // from the configured frontend origin, so no wildcards here.
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root))
        .route("/healthcheck", get(healthcheck))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/user/create", post(public::user::register))
        .route("/user/login", post(public::user::login))
        .route("/tag/", get(public::tag::list))
        .route("/tag/:id", get(public::tag::get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/", get(protected::user::get_self))
        .route("/user/update", put(protected::user::update_self))
        .route("/user/delete", delete(protected::user::delete_self))
        .route("/user/logout", post(protected::session::logout))
        .route("/checkLogin", get(protected::session::check_login))
        .route("/expense/create", post(protected::expense::create))
        .route("/expense/", get(protected::expense::list))
        .route("/expense/update/:id", put(protected::expense::update))
        .route("/expense/delete/:id", delete(protected::expense::delete))
        .route("/income/create", post(protected::income::create))
        .route("/income/", get(protected::income::list))
        .route("/income/update/:id", put(protected::income::update))
        .route("/income/delete/:id", delete(protected::income::delete))
        .route("/tag/create", post(protected::tag::create))
        .route("/tag/update/:id", put(protected::tag::update))
        .route("/tag/delete/:id", delete(protected::tag::delete))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "fintrack API",
        "version": version,
        "endpoints": {
            "user": "/user/* (register and login public, rest cookie-authenticated)",
            "expense": "/expense/* (cookie-authenticated, owner-scoped)",
            "income": "/income/* (cookie-authenticated, owner-scoped)",
            "tag": "/tag/* (list and get public, mutations cookie-authenticated)",
            "session": "/checkLogin, /user/logout",
        },
    }))
}

async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
