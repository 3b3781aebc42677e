//! UI router — static assets plus the `/ui/` JSON endpoints.
//!
//! The intake form, login, and the session probe are public; everything
//! else passes the session gate inside its handler (user management passes
//! the admin gate). Gate refusals answer with a structured error carrying
//! the login redirect, so an unauthenticated admin page never fetches data.

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::core_state::CoreState;
use crate::ui::pages;

/// Build the full UI router: `/ui/*` endpoints over the shared state, with
/// the static page shell served for everything else.
pub fn ui_router(core: Arc<CoreState>, assets_dir: PathBuf) -> Router {
    let endpoints = Router::new()
        // Public intake page
        .route("/triage", get(pages::intake::snapshot).post(pages::intake::submit))
        // Login area
        .route("/login", post(pages::auth::login))
        .route("/logout", post(pages::auth::logout))
        .route("/session", get(pages::auth::session))
        .route("/status", get(pages::status::backend_status))
        // Admin dashboard (session-gated in handlers)
        .route("/dashboard", get(pages::dashboard::snapshot))
        .route("/dashboard/refresh", post(pages::dashboard::refresh))
        .route("/dashboard/menu", post(pages::dashboard::select_menu))
        .route(
            "/dashboard/validate/begin",
            post(pages::dashboard::begin_validation),
        )
        .route(
            "/dashboard/validate/submit",
            post(pages::dashboard::submit_validation),
        )
        .route(
            "/dashboard/validate/cancel",
            post(pages::dashboard::cancel_validation),
        )
        .route(
            "/dashboard/notice/dismiss",
            post(pages::dashboard::dismiss_notice),
        )
        // User administration (admin-gated in handlers)
        .route("/users", get(pages::users::list).post(pages::users::create))
        .route(
            "/users/:id",
            get(pages::users::detail)
                .put(pages::users::update)
                .delete(pages::users::remove),
        )
        .with_state(core);

    Router::new()
        .nest("/ui", endpoints)
        .fallback_service(ServeDir::new(assets_dir))
        .layer(CorsLayer::permissive())
}
