pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::{middleware, Router};
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        // Session
        .route("/api/logout", post(routes::auth::logout))
        .route("/api/me", get(routes::auth::me))
        // Schedules
        .route("/api/schedules", get(routes::schedules::list_schedules))
        .route(
            "/api/schedules/{date}",
            get(routes::schedules::get_schedule).delete(routes::schedules::delete_schedule),
        )
        .route(
            "/api/schedules/{date}/slots/{hour}",
            put(routes::schedules::set_slot),
        )
        .route(
            "/api/schedules/{date}/clear",
            post(routes::schedules::clear_schedule),
        )
        .route(
            "/api/schedules/{date}/assignments/{name}",
            get(routes::schedules::get_assignments),
        )
        // Config
        .route("/api/roster", get(routes::config::get_roster))
        .route("/api/config", get(routes::config::get_config))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/api/login", post(routes::auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the hall API server on `port`.
pub async fn serve(root: PathBuf, port: u16) -> anyhow::Result<()> {
    let app_state = state::AppState::open(root)?;
    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("hall API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
