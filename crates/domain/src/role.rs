use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shopdesk_core::{AppError, AppResult};

/// Organizational capability tier held by a console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Headquarters administrator with organization-wide reach.
    HqAdmin,
    /// Administrator of one or more warehouses.
    WarehouseAdmin,
    /// Manager of a single store.
    StoreManager,
    /// Staff member working in a store.
    StoreStaff,
}

impl UserRole {
    /// Returns the stable machine id for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HqAdmin => "hq_admin",
            Self::WarehouseAdmin => "warehouse_admin",
            Self::StoreManager => "store_manager",
            Self::StoreStaff => "store_staff",
        }
    }

    /// Returns every role in declaration order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[UserRole] = &[
            UserRole::HqAdmin,
            UserRole::WarehouseAdmin,
            UserRole::StoreManager,
            UserRole::StoreStaff,
        ];

        ALL
    }

    /// Parses a stored or transported role id.
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl Display for UserRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hq_admin" => Ok(Self::HqAdmin),
            "warehouse_admin" => Ok(Self::WarehouseAdmin),
            "store_manager" => Ok(Self::StoreManager),
            "store_staff" => Ok(Self::StoreStaff),
            _ => Err(AppError::Validation(format!("unknown user role '{value}'"))),
        }
    }
}
