use serde::{Deserialize, Serialize};
use shopdesk_application::EffectiveAccess;
use shopdesk_domain::{RejectedGrant, RoleScope, UserProfile, UserRoleGrant};
use ts_rs::TS;

use super::roles::RoleDisplayNameResponse;

/// Query string for a single permission check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-query.ts"
)]
pub struct PermissionCheckQuery {
    pub permission: String,
    pub store_id: Option<String>,
    pub warehouse_id: Option<String>,
}

/// Result of a single permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    pub permission: String,
    pub scope: String,
    pub granted: bool,
}

/// API representation of a scoped role grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/scoped-role-response.ts"
)]
pub struct ScopedRoleResponse {
    pub grant_id: String,
    pub role: String,
    /// One of `organization`, `store` or `warehouse`.
    pub scope_kind: String,
    pub scope_id: Option<String>,
    pub granted_at: String,
}

/// API representation of a grant row that failed validation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rejected-grant-response.ts"
)]
pub struct RejectedGrantResponse {
    pub record_id: String,
    /// Scopes that resolve to no role while this row is broken.
    pub scopes: Vec<String>,
    pub reason: String,
}

/// API representation of the profile behind an access decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/profile-response.ts"
)]
pub struct ProfileResponse {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub store_id: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
}

/// API representation of a subject's effective access.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-access-response.ts"
)]
pub struct EffectiveAccessResponse {
    pub subject: String,
    pub role: Option<String>,
    pub display_name: Option<RoleDisplayNameResponse>,
    pub permissions: Vec<String>,
    pub areas: Vec<String>,
    pub profile: Option<ProfileResponse>,
    pub scoped_roles: Vec<ScopedRoleResponse>,
    pub rejected_grants: Vec<RejectedGrantResponse>,
    pub denied: bool,
    pub denial_reason: Option<String>,
}

impl From<UserRoleGrant> for ScopedRoleResponse {
    fn from(value: UserRoleGrant) -> Self {
        let (scope_kind, scope_id) = match value.scope() {
            RoleScope::Organization => ("organization", None),
            RoleScope::Store(store_id) => ("store", Some(store_id.as_str().to_owned())),
            RoleScope::Warehouse(warehouse_id) => {
                ("warehouse", Some(warehouse_id.as_str().to_owned()))
            }
        };

        Self {
            grant_id: value.id().to_string(),
            role: value.role().as_str().to_owned(),
            scope_kind: scope_kind.to_owned(),
            scope_id,
            granted_at: value.created_at().to_rfc3339(),
        }
    }
}

impl From<RejectedGrant> for RejectedGrantResponse {
    fn from(value: RejectedGrant) -> Self {
        Self {
            record_id: value.record_id().to_owned(),
            scopes: value.scopes().iter().map(ToString::to_string).collect(),
            reason: value.reason().to_owned(),
        }
    }
}

impl From<UserProfile> for ProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id().to_string(),
            email: value.email().map(|email| email.as_str().to_owned()),
            full_name: value.full_name().map(str::to_owned),
            phone: value.phone().map(str::to_owned),
            store_id: value.store_id().map(|store_id| store_id.as_str().to_owned()),
            is_active: value.is_active(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

impl From<EffectiveAccess> for EffectiveAccessResponse {
    fn from(value: EffectiveAccess) -> Self {
        Self {
            subject: value.subject.to_string(),
            role: value.role.map(|role| role.as_str().to_owned()),
            display_name: value.display_name.map(RoleDisplayNameResponse::from),
            permissions: value
                .permissions
                .iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
            areas: value
                .areas
                .iter()
                .map(|area| area.as_str().to_owned())
                .collect(),
            profile: value.profile.map(ProfileResponse::from),
            scoped_roles: value
                .scoped_roles
                .into_iter()
                .map(ScopedRoleResponse::from)
                .collect(),
            rejected_grants: value
                .rejected_grants
                .into_iter()
                .map(RejectedGrantResponse::from)
                .collect(),
            denied: value.denial.is_some(),
            denial_reason: value.denial.map(|denial| denial.as_str().to_owned()),
        }
    }
}
