use axum::Json;
use axum::extract::{Path, State};
use shopdesk_domain::{ConsoleArea, UserRole};

use crate::dto::{ConsoleAreaResponse, RoleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_catalog
        .definitions()?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn role_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = UserRole::parse(role.as_str())?;
    let definition = state.role_catalog.definition(role)?;

    Ok(Json(RoleResponse::from(definition)))
}

pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    let role = UserRole::parse(role.as_str())?;
    let permissions = state
        .role_catalog
        .permissions(role)?
        .iter()
        .map(|permission| permission.as_str().to_owned())
        .collect();

    Ok(Json(permissions))
}

pub async fn list_areas_handler() -> Json<Vec<ConsoleAreaResponse>> {
    Json(
        ConsoleArea::all()
            .iter()
            .copied()
            .map(ConsoleAreaResponse::from)
            .collect(),
    )
}
