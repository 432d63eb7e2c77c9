mod cors;

use axum::Router;
use axum::routing::{get, put};
use teamgate_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let team_routes = Router::new()
        .route(
            "/api/teams/current/access",
            get(handlers::teams::current_access_handler),
        )
        .route(
            "/api/teams/current/audit-logs",
            get(handlers::teams::list_audit_logs_handler),
        )
        .route(
            "/api/teams/{team_id}/members",
            get(handlers::members::list_members_handler),
        )
        .route(
            "/api/teams/{team_id}/members/assignable-roles",
            get(handlers::members::assignable_roles_handler),
        )
        .route(
            "/api/teams/{team_id}/members/{membership_id}",
            put(handlers::members::update_member_role_handler)
                .delete(handlers::members::remove_member_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(team_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
