use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use shopdesk_domain::{ConsoleArea, Permission, RoleScope, SubjectId};

use crate::dto::{EffectiveAccessResponse, PermissionCheckQuery, PermissionCheckResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn effective_access_handler(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> ApiResult<Json<EffectiveAccessResponse>> {
    let subject = SubjectId::parse(subject.as_str())?;
    let access = state.access_service.effective_access(subject).await?;

    Ok(Json(EffectiveAccessResponse::from(access)))
}

pub async fn permission_check_handler(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Query(query): Query<PermissionCheckQuery>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let subject = SubjectId::parse(subject.as_str())?;
    let permission = Permission::from_transport(query.permission.as_str())?;
    let scope = RoleScope::from_columns(query.store_id, query.warehouse_id)?;

    let granted = state
        .access_service
        .has_permission(subject, permission, &scope)
        .await?;

    Ok(Json(PermissionCheckResponse {
        permission: permission.as_str().to_owned(),
        scope: scope.to_string(),
        granted,
    }))
}

pub async fn area_access_handler(
    State(state): State<AppState>,
    Path((subject, area)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let subject = SubjectId::parse(subject.as_str())?;
    let area = ConsoleArea::from_str(area.as_str())?;

    state.access_service.require_area(subject, area).await?;

    Ok(StatusCode::NO_CONTENT)
}
