//! Static role tables and the resolvers built on top of them.
//!
//! Both tables are process-wide constants. They are only reachable through
//! [`RoleCatalog`] and the `resolve_*` helpers, which validate external role
//! tags before looking anything up.

use serde::Serialize;
use shopdesk_core::{AppError, AppResult};

use crate::{ConsoleArea, Permission, UserRole};

/// Bilingual human-readable label for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDisplayName {
    en: &'static str,
    zh: &'static str,
}

impl RoleDisplayName {
    /// Creates a label pair.
    #[must_use]
    pub const fn new(en: &'static str, zh: &'static str) -> Self {
        Self { en, zh }
    }

    /// Returns the English label.
    #[must_use]
    pub fn en(&self) -> &'static str {
        self.en
    }

    /// Returns the Chinese label.
    #[must_use]
    pub fn zh(&self) -> &'static str {
        self.zh
    }
}

/// One fully resolved role row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Role id.
    pub role: UserRole,
    /// Display labels for the role.
    pub display_name: RoleDisplayName,
    /// Permissions granted to the role, in authored order.
    pub permissions: &'static [Permission],
}

const ROLE_DISPLAY_NAMES: &[(UserRole, RoleDisplayName)] = &[
    (UserRole::HqAdmin, RoleDisplayName::new("HQ Admin", "HQ 管理员")),
    (
        UserRole::WarehouseAdmin,
        RoleDisplayName::new("Warehouse Admin", "仓库管理员"),
    ),
    (
        UserRole::StoreManager,
        RoleDisplayName::new("Store Manager", "店长"),
    ),
    (UserRole::StoreStaff, RoleDisplayName::new("Store Staff", "店员")),
];

const ROLE_PERMISSIONS: &[(UserRole, &[Permission])] = &[
    (
        UserRole::HqAdmin,
        &[
            Permission::ViewAll,
            Permission::ManageAll,
            Permission::CreateStores,
            Permission::ManageUsers,
        ],
    ),
    (
        UserRole::WarehouseAdmin,
        &[
            Permission::ViewWarehouse,
            Permission::ManageInventory,
            Permission::CreateTransfers,
        ],
    ),
    (
        UserRole::StoreManager,
        &[
            Permission::ViewStore,
            Permission::ManageStore,
            Permission::CreateOrders,
            Permission::ManageStaff,
        ],
    ),
    (
        UserRole::StoreStaff,
        &[
            Permission::ViewStore,
            Permission::CreateOrders,
            Permission::ViewInventory,
        ],
    ),
];

static BUILTIN_ROLE_CATALOG: RoleCatalog = RoleCatalog::new(ROLE_DISPLAY_NAMES, ROLE_PERMISSIONS);

/// Read-only view over a role display table and a role permission table.
#[derive(Debug, Clone, Copy)]
pub struct RoleCatalog {
    display_names: &'static [(UserRole, RoleDisplayName)],
    permissions: &'static [(UserRole, &'static [Permission])],
}

impl RoleCatalog {
    /// Wraps two tables without checking them. Call [`RoleCatalog::validate`]
    /// before serving lookups from a catalog built this way.
    #[must_use]
    pub const fn new(
        display_names: &'static [(UserRole, RoleDisplayName)],
        permissions: &'static [(UserRole, &'static [Permission])],
    ) -> Self {
        Self {
            display_names,
            permissions,
        }
    }

    /// Returns the catalog compiled into the binary.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN_ROLE_CATALOG
    }

    /// Checks that both tables cover every role exactly once with usable data.
    pub fn validate(&self) -> AppResult<()> {
        for role in UserRole::all() {
            let display_name = single_entry(self.display_names, *role, "display name")?;
            if display_name.en.trim().is_empty() || display_name.zh.trim().is_empty() {
                return Err(AppError::Configuration(format!(
                    "role '{role}' has an empty display label"
                )));
            }

            let permissions = single_entry(self.permissions, *role, "permission")?;
            if permissions.is_empty() {
                return Err(AppError::Configuration(format!(
                    "role '{role}' grants no permissions"
                )));
            }

            for (index, permission) in permissions.iter().enumerate() {
                if permissions[..index].contains(permission) {
                    return Err(AppError::Configuration(format!(
                        "role '{role}' lists permission '{permission}' more than once"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns the display labels for a role.
    pub fn display_name(&self, role: UserRole) -> AppResult<&'static RoleDisplayName> {
        self.display_names
            .iter()
            .find(|(entry_role, _)| *entry_role == role)
            .map(|(_, display_name)| display_name)
            .ok_or_else(|| {
                AppError::Configuration(format!("role '{role}' has no display name entry"))
            })
    }

    /// Returns the ordered permissions granted to a role.
    pub fn permissions(&self, role: UserRole) -> AppResult<&'static [Permission]> {
        self.permissions
            .iter()
            .find(|(entry_role, _)| *entry_role == role)
            .map(|(_, permissions)| *permissions)
            .ok_or_else(|| {
                AppError::Configuration(format!("role '{role}' has no permission entry"))
            })
    }

    /// Returns whether the role lists the permission. No implied grants.
    pub fn has_permission(&self, role: UserRole, permission: Permission) -> AppResult<bool> {
        Ok(self.permissions(role)?.contains(&permission))
    }

    /// Returns the console areas a role may open.
    ///
    /// An area is accessible when the role holds at least one of the
    /// permissions required by that area (logical OR).
    pub fn accessible_areas(&self, role: UserRole) -> AppResult<Vec<ConsoleArea>> {
        self.accessible_areas_for_roles(&[role])
    }

    /// Returns the console areas opened by any of the roles, in area
    /// declaration order.
    pub fn accessible_areas_for_roles(
        &self,
        roles: &[UserRole],
    ) -> AppResult<Vec<ConsoleArea>> {
        let mut permissions = Vec::new();
        for role in roles {
            permissions.extend_from_slice(self.permissions(*role)?);
        }

        Ok(ConsoleArea::all()
            .iter()
            .copied()
            .filter(|area| area.is_accessible_with(&permissions))
            .collect())
    }

    /// Returns one resolved row per role, in role declaration order.
    pub fn definitions(&self) -> AppResult<Vec<RoleDefinition>> {
        UserRole::all()
            .iter()
            .map(|role| self.definition(*role))
            .collect()
    }

    /// Returns the resolved row for one role.
    pub fn definition(&self, role: UserRole) -> AppResult<RoleDefinition> {
        Ok(RoleDefinition {
            role,
            display_name: *self.display_name(role)?,
            permissions: self.permissions(role)?,
        })
    }
}

/// Resolves the display labels for an external role tag.
pub fn resolve_role_display(role: &str) -> AppResult<&'static RoleDisplayName> {
    let role = UserRole::parse(role)?;
    RoleCatalog::builtin().display_name(role)
}

/// Resolves the ordered permissions for an external role tag.
pub fn resolve_role_permissions(role: &str) -> AppResult<&'static [Permission]> {
    let role = UserRole::parse(role)?;
    RoleCatalog::builtin().permissions(role)
}

fn single_entry<T: Copy>(
    table: &[(UserRole, T)],
    role: UserRole,
    table_name: &str,
) -> AppResult<T> {
    let mut entries = table
        .iter()
        .filter(|(entry_role, _)| *entry_role == role)
        .map(|(_, value)| *value);

    match (entries.next(), entries.next()) {
        (Some(value), None) => Ok(value),
        (None, _) => Err(AppError::Configuration(format!(
            "role '{role}' is missing from the {table_name} table"
        ))),
        (Some(_), Some(_)) => Err(AppError::Configuration(format!(
            "role '{role}' appears more than once in the {table_name} table"
        ))),
    }
}
