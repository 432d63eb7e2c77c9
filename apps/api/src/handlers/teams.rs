use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde::Deserialize;
use teamgate_core::AppError;
use teamgate_domain::{Permission, Role};

use crate::auth::TeamRequest;
use crate::dto::{AccessSnapshotResponse, AuditLogEntryResponse};
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_AUDIT_PAGE_SIZE: usize = 50;
const MAX_AUDIT_PAGE_SIZE: usize = 200;

const AUDIT_LOG_ROLES: [Role; 3] = [Role::SuperAdmin, Role::Owner, Role::Admin];

#[derive(Debug, Default, Deserialize)]
pub struct AuditLogQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub async fn current_access_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<AccessSnapshotResponse>> {
    let request = TeamRequest::current_team(&headers)?;
    let service = &state.team_member_service;

    let snapshot = state
        .gate
        .with_permission(request, Permission::TeamRead, |_, context| async move {
            let assignable_roles = service.assignable_roles(&context);
            Ok(AccessSnapshotResponse::new(&context, &assignable_roles))
        })
        .await?;

    Ok(Json(snapshot))
}

pub async fn list_audit_logs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<AuditLogQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<AuditLogEntryResponse>>> {
    let request = TeamRequest::current_team(&headers)?.with_params(query);
    let service = &state.team_member_service;

    let entries = state
        .gate
        .with_roles(request, &AUDIT_LOG_ROLES, |request, context| async move {
            let Query(query) = request.params.map_err(|rejection| {
                AppError::Validation(format!(
                    "invalid query string: {}",
                    rejection.body_text()
                ))
            })?;
            let limit = query
                .limit
                .unwrap_or(DEFAULT_AUDIT_PAGE_SIZE)
                .min(MAX_AUDIT_PAGE_SIZE);
            let offset = query.offset.unwrap_or(0);
            service.list_audit_log(&context, limit, offset).await
        })
        .await?
        .into_iter()
        .map(AuditLogEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
