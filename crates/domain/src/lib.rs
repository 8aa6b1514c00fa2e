//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod area;
mod catalog;
mod grant;
mod ids;
mod permission;
mod profile;
mod role;

pub use area::ConsoleArea;
pub use catalog::{
    RoleCatalog, RoleDefinition, RoleDisplayName, resolve_role_display, resolve_role_permissions,
};
pub use grant::{RejectedGrant, RoleScope, UserRoleGrant, UserRoleGrantRecord};
pub use ids::{ProfileId, StoreId, SubjectId, WarehouseId};
pub use permission::Permission;
pub use profile::{EmailAddress, UserProfile, UserProfileRecord};
pub use role::UserRole;
