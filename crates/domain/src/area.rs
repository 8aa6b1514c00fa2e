use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shopdesk_core::AppError;

use crate::Permission;

/// Guarded console section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleArea {
    /// Landing dashboard.
    Dashboard,
    /// Store directory and store creation.
    Stores,
    /// User account administration.
    Users,
    /// Inventory levels for stores and warehouses.
    Inventory,
    /// Transfer in, transfer out and transfer records.
    Transfers,
    /// Purchase order creation and history.
    PurchaseOrders,
    /// Wholesale pricing and customers.
    Wholesale,
    /// Store staff management.
    Staff,
    /// Sales pivot reports.
    Reports,
}

impl ConsoleArea {
    /// Returns a stable storage value for this area.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Stores => "stores",
            Self::Users => "users",
            Self::Inventory => "inventory",
            Self::Transfers => "transfers",
            Self::PurchaseOrders => "purchase_orders",
            Self::Wholesale => "wholesale",
            Self::Staff => "staff",
            Self::Reports => "reports",
        }
    }

    /// Returns all known areas in navigation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ConsoleArea] = &[
            ConsoleArea::Dashboard,
            ConsoleArea::Stores,
            ConsoleArea::Users,
            ConsoleArea::Inventory,
            ConsoleArea::Transfers,
            ConsoleArea::PurchaseOrders,
            ConsoleArea::Wholesale,
            ConsoleArea::Staff,
            ConsoleArea::Reports,
        ];

        ALL
    }

    /// Returns the permissions of which at least one opens this area.
    #[must_use]
    pub fn required_permissions(&self) -> &'static [Permission] {
        match self {
            Self::Dashboard => &[
                Permission::ViewAll,
                Permission::ViewWarehouse,
                Permission::ViewStore,
            ],
            Self::Stores => &[Permission::CreateStores, Permission::ManageAll],
            Self::Users => &[Permission::ManageUsers],
            Self::Inventory => &[
                Permission::ViewAll,
                Permission::ViewWarehouse,
                Permission::ManageInventory,
                Permission::ViewInventory,
            ],
            Self::Transfers => &[Permission::ViewAll, Permission::CreateTransfers],
            Self::PurchaseOrders => &[Permission::ViewAll, Permission::CreateOrders],
            Self::Wholesale => &[Permission::ManageAll, Permission::ManageStore],
            Self::Staff => &[Permission::ManageStaff, Permission::ManageUsers],
            Self::Reports => &[
                Permission::ViewAll,
                Permission::ViewWarehouse,
                Permission::ManageStore,
            ],
        }
    }

    /// Returns whether the granted permissions open this area.
    #[must_use]
    pub fn is_accessible_with(&self, granted: &[Permission]) -> bool {
        self.required_permissions()
            .iter()
            .any(|required| granted.contains(required))
    }
}

impl FromStr for ConsoleArea {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|area| area.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown console area '{value}'")))
    }
}
