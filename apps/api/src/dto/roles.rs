use serde::Serialize;
use shopdesk_domain::{ConsoleArea, RoleDefinition, RoleDisplayName};
use ts_rs::TS;

/// Bilingual role label.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-display-name-response.ts"
)]
pub struct RoleDisplayNameResponse {
    pub en: String,
    pub zh: String,
}

/// API representation of a console role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub role: String,
    pub display_name: RoleDisplayNameResponse,
    pub permissions: Vec<String>,
}

/// API representation of a guarded console area.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/console-area-response.ts"
)]
pub struct ConsoleAreaResponse {
    pub area: String,
    /// Holding any one of these permissions opens the area.
    pub required_permissions: Vec<String>,
}

impl From<RoleDisplayName> for RoleDisplayNameResponse {
    fn from(value: RoleDisplayName) -> Self {
        Self {
            en: value.en().to_owned(),
            zh: value.zh().to_owned(),
        }
    }
}

impl From<RoleDefinition> for RoleResponse {
    fn from(value: RoleDefinition) -> Self {
        Self {
            role: value.role.as_str().to_owned(),
            display_name: RoleDisplayNameResponse::from(value.display_name),
            permissions: value
                .permissions
                .iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
        }
    }
}

impl From<ConsoleArea> for ConsoleAreaResponse {
    fn from(value: ConsoleArea) -> Self {
        Self {
            area: value.as_str().to_owned(),
            required_permissions: value
                .required_permissions()
                .iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
        }
    }
}
