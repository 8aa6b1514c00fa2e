use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{AppError, AppResult};
use uuid::Uuid;

use crate::profile::optional_text;
use crate::{StoreId, SubjectId, UserRole, WarehouseId};

/// Where a role grant applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RoleScope {
    /// Organization-wide grant.
    Organization,
    /// Grant bound to one store.
    Store(StoreId),
    /// Grant bound to one warehouse.
    Warehouse(WarehouseId),
}

impl RoleScope {
    /// Builds a scope from the two optional columns used by storage.
    ///
    /// Blank values count as absent. Populating both columns is rejected.
    pub fn from_columns(
        store_id: Option<String>,
        warehouse_id: Option<String>,
    ) -> AppResult<Self> {
        match (optional_text(store_id), optional_text(warehouse_id)) {
            (None, None) => Ok(Self::Organization),
            (Some(store_id), None) => Ok(Self::Store(StoreId::new(store_id)?)),
            (None, Some(warehouse_id)) => Ok(Self::Warehouse(WarehouseId::new(warehouse_id)?)),
            (Some(store_id), Some(warehouse_id)) => Err(AppError::Validation(format!(
                "grant cannot be scoped to both store '{store_id}' and warehouse '{warehouse_id}'"
            ))),
        }
    }

    /// Returns the store id for store-scoped grants.
    #[must_use]
    pub fn store_id(&self) -> Option<&StoreId> {
        match self {
            Self::Store(store_id) => Some(store_id),
            _ => None,
        }
    }

    /// Returns the warehouse id for warehouse-scoped grants.
    #[must_use]
    pub fn warehouse_id(&self) -> Option<&WarehouseId> {
        match self {
            Self::Warehouse(warehouse_id) => Some(warehouse_id),
            _ => None,
        }
    }
}

impl Display for RoleScope {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Organization => formatter.write_str("organization"),
            Self::Store(store_id) => write!(formatter, "store:{store_id}"),
            Self::Warehouse(warehouse_id) => write!(formatter, "warehouse:{warehouse_id}"),
        }
    }
}

/// Raw role grant row as delivered by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleGrantRecord {
    /// Grant id.
    pub id: String,
    /// Authentication subject id.
    pub user_id: String,
    /// Granted role tag.
    pub role: String,
    /// Store scope column.
    #[serde(default)]
    pub store_id: Option<String>,
    /// Warehouse scope column.
    #[serde(default)]
    pub warehouse_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserRoleGrantRecord {
    /// Returns every scope named by the row's scope columns.
    ///
    /// Rows with no populated column name the organization scope. A row that
    /// populates both columns names both scopes.
    #[must_use]
    pub fn touched_scopes(&self) -> Vec<RoleScope> {
        let store = optional_text(self.store_id.clone())
            .and_then(|value| StoreId::new(value).ok())
            .map(RoleScope::Store);
        let warehouse = optional_text(self.warehouse_id.clone())
            .and_then(|value| WarehouseId::new(value).ok())
            .map(RoleScope::Warehouse);

        let scopes: Vec<RoleScope> = store.into_iter().chain(warehouse).collect();
        if scopes.is_empty() {
            return vec![RoleScope::Organization];
        }

        scopes
    }

    /// Converts the row, keeping a [`RejectedGrant`] when it fails validation.
    pub fn into_grant(self) -> Result<UserRoleGrant, RejectedGrant> {
        let record_id = self.id.clone();
        let scopes = self.touched_scopes();

        UserRoleGrant::try_from(self).map_err(|error| {
            let reason = match error {
                AppError::Validation(message) => message,
                other => other.to_string(),
            };
            RejectedGrant::new(record_id, scopes, reason)
        })
    }
}

/// Stored grant row that could not be turned into a [`UserRoleGrant`].
///
/// The scopes it names resolve to no role at all until the row is repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedGrant {
    record_id: String,
    scopes: Vec<RoleScope>,
    reason: String,
}

impl RejectedGrant {
    /// Creates a rejection for a stored row.
    #[must_use]
    pub fn new(
        record_id: impl Into<String>,
        scopes: Vec<RoleScope>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            scopes,
            reason: reason.into(),
        }
    }

    /// Returns the stored id of the rejected row.
    #[must_use]
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Returns the scopes named by the rejected row.
    #[must_use]
    pub fn scopes(&self) -> &[RoleScope] {
        &self.scopes
    }

    /// Returns why the row was rejected.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns whether the rejected row names this scope.
    #[must_use]
    pub fn covers(&self, scope: &RoleScope) -> bool {
        self.scopes.contains(scope)
    }
}

/// Context-specific role held by a subject in addition to its primary role.
///
/// Stored rows become grants through `TryFrom<UserRoleGrantRecord>`:
///
/// ```compile_fail
/// let _: Result<shopdesk_domain::UserRoleGrant, _> = serde_json::from_str("{}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRoleGrant {
    id: Uuid,
    user_id: SubjectId,
    role: UserRole,
    scope: RoleScope,
    created_at: DateTime<Utc>,
}

impl UserRoleGrant {
    /// Creates a new grant with a random id.
    #[must_use]
    pub fn new(user_id: SubjectId, role: UserRole, scope: RoleScope) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            scope,
            created_at: Utc::now(),
        }
    }

    /// Returns the grant id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the subject holding the grant.
    #[must_use]
    pub fn user_id(&self) -> SubjectId {
        self.user_id
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns where the grant applies.
    #[must_use]
    pub fn scope(&self) -> &RoleScope {
        &self.scope
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TryFrom<UserRoleGrantRecord> for UserRoleGrant {
    type Error = AppError;

    fn try_from(record: UserRoleGrantRecord) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(record.id.trim()).map_err(|error| {
            AppError::Validation(format!("invalid grant id '{}': {error}", record.id))
        })?;
        let user_id = SubjectId::parse(&record.user_id)?;
        let role = UserRole::parse(&record.role).map_err(|_| {
            AppError::Validation(format!("grant '{id}' has unknown role '{}'", record.role))
        })?;
        let scope = RoleScope::from_columns(record.store_id, record.warehouse_id)
            .map_err(|error| AppError::Validation(format!("grant '{id}': {error}")))?;

        Ok(Self {
            id,
            user_id,
            role,
            scope,
            created_at: record.created_at,
        })
    }
}
