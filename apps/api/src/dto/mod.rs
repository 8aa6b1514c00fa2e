mod access;
mod common;
mod roles;

pub use access::{EffectiveAccessResponse, PermissionCheckQuery, PermissionCheckResponse};
pub use common::HealthResponse;
pub use roles::{ConsoleAreaResponse, RoleResponse};
