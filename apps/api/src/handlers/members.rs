use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use teamgate_core::AppError;
use teamgate_domain::{MembershipId, Permission, Role};

use crate::auth::TeamRequest;
use crate::dto::{AssignableRolesResponse, MemberResponse, UpdateMemberRoleRequest};
use crate::error::ApiResult;
use crate::state::AppState;

const MEMBER_ADMIN_PERMISSIONS: [Permission; 3] = [
    Permission::MembersInvite,
    Permission::MembersUpdateRole,
    Permission::MembersRemove,
];

pub async fn list_members_handler(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let request = TeamRequest::for_team(team_id.as_str(), &headers)?;
    let service = &state.team_member_service;

    let members = state
        .gate
        .with_permission(request, Permission::MembersRead, |_, context| async move {
            service.list_members(&context).await
        })
        .await?
        .into_iter()
        .map(MemberResponse::from)
        .collect();

    Ok(Json(members))
}

pub async fn assignable_roles_handler(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<AssignableRolesResponse>> {
    let request = TeamRequest::for_team(team_id.as_str(), &headers)?;
    let service = &state.team_member_service;

    let roles = state
        .gate
        .with_any_permission(
            request,
            &MEMBER_ADMIN_PERMISSIONS,
            |_, context| async move { Ok(service.assignable_roles(&context)) },
        )
        .await?;

    Ok(Json(AssignableRolesResponse::from(roles)))
}

pub async fn update_member_role_handler(
    State(state): State<AppState>,
    Path((team_id, membership_id)): Path<(String, String)>,
    headers: HeaderMap,
    payload: Result<Json<UpdateMemberRoleRequest>, JsonRejection>,
) -> ApiResult<Json<MemberResponse>> {
    let request = TeamRequest::for_team(team_id.as_str(), &headers)?
        .with_params((membership_id, payload));
    let service = &state.team_member_service;

    let updated = state
        .gate
        .with_permission(
            request,
            Permission::MembersUpdateRole,
            |request, context| async move {
                let (membership_id, payload) = request.params;
                let Json(payload) = payload.map_err(|rejection| {
                    AppError::Validation(format!(
                        "invalid request body: {}",
                        rejection.body_text()
                    ))
                })?;
                let membership_id = MembershipId::parse(membership_id.as_str())?;
                let role = Role::from_transport(payload.role.as_str())?;
                service
                    .change_member_role(&context, membership_id, role)
                    .await
            },
        )
        .await?;

    Ok(Json(MemberResponse::from(updated)))
}

pub async fn remove_member_handler(
    State(state): State<AppState>,
    Path((team_id, membership_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let request = TeamRequest::for_team(team_id.as_str(), &headers)?.with_params(membership_id);
    let service = &state.team_member_service;

    state
        .gate
        .with_permission(
            request,
            Permission::MembersRemove,
            |request, context| async move {
                let membership_id = MembershipId::parse(request.params.as_str())?;
                service.remove_member(&context, membership_id).await
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
