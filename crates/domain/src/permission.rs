use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shopdesk_core::AppError;

/// Capabilities granted to console roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows viewing data across the whole organization.
    ViewAll,
    /// Allows managing data across the whole organization.
    ManageAll,
    /// Allows opening new stores.
    CreateStores,
    /// Allows managing user accounts.
    ManageUsers,
    /// Allows viewing warehouse data.
    ViewWarehouse,
    /// Allows adjusting inventory levels.
    ManageInventory,
    /// Allows creating stock transfers.
    CreateTransfers,
    /// Allows viewing store data.
    ViewStore,
    /// Allows managing store settings.
    ManageStore,
    /// Allows creating purchase orders.
    CreateOrders,
    /// Allows managing store staff.
    ManageStaff,
    /// Allows viewing inventory levels.
    ViewInventory,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewAll => "view_all",
            Self::ManageAll => "manage_all",
            Self::CreateStores => "create_stores",
            Self::ManageUsers => "manage_users",
            Self::ViewWarehouse => "view_warehouse",
            Self::ManageInventory => "manage_inventory",
            Self::CreateTransfers => "create_transfers",
            Self::ViewStore => "view_store",
            Self::ManageStore => "manage_store",
            Self::CreateOrders => "create_orders",
            Self::ManageStaff => "manage_staff",
            Self::ViewInventory => "view_inventory",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ViewAll,
            Permission::ManageAll,
            Permission::CreateStores,
            Permission::ManageUsers,
            Permission::ViewWarehouse,
            Permission::ManageInventory,
            Permission::CreateTransfers,
            Permission::ViewStore,
            Permission::ManageStore,
            Permission::CreateOrders,
            Permission::ManageStaff,
            Permission::ViewInventory,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}
