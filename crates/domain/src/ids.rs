use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use shopdesk_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

/// Internal identifier of a profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Parses a stored profile identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        parse_uuid(value, "profile id").map(Self)
    }
}

impl Display for ProfileId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier of the authentication subject a profile or grant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(Uuid);

impl SubjectId {
    /// Creates a random subject identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a subject identifier from transport or storage.
    pub fn parse(value: &str) -> AppResult<Self> {
        parse_uuid(value, "subject id").map(Self)
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SubjectId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier of a store, such as `store-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(NonEmptyString);

impl StoreId {
    /// Creates a validated store identifier.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        NonEmptyString::trimmed(value)
            .map(Self)
            .map_err(|_| AppError::Validation("store id must not be empty".to_owned()))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for StoreId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Identifier of a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarehouseId(NonEmptyString);

impl WarehouseId {
    /// Creates a validated warehouse identifier.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        NonEmptyString::trimmed(value)
            .map(Self)
            .map_err(|_| AppError::Validation("warehouse id must not be empty".to_owned()))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for WarehouseId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn parse_uuid(value: &str, label: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|error| AppError::Validation(format!("invalid {label} '{value}': {error}")))
}
