use axum::Router;
use axum::routing::get;
use shopdesk_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let catalog_routes = Router::new()
        .route("/api/roles", get(handlers::roles::list_roles_handler))
        .route("/api/roles/{role}", get(handlers::roles::role_handler))
        .route(
            "/api/roles/{role}/permissions",
            get(handlers::roles::role_permissions_handler),
        )
        .route("/api/areas", get(handlers::roles::list_areas_handler));

    let access_routes = Router::new()
        .route(
            "/api/access/{subject}",
            get(handlers::access::effective_access_handler),
        )
        .route(
            "/api/access/{subject}/check",
            get(handlers::access::permission_check_handler),
        )
        .route(
            "/api/access/{subject}/areas/{area}",
            get(handlers::access::area_access_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(catalog_routes)
        .merge(access_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
