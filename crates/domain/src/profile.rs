//! Profile records as stored by the identity backend, and their validated form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{AppError, AppResult};

use crate::{ProfileId, StoreId, SubjectId, UserRole};

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated, lower-cased email address.
    ///
    /// Performs basic structural validation: exactly one `@`, non-empty local
    /// part, and a domain containing at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if local.is_empty() || domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@' after a non-empty local part"
                    .to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw profile row as delivered by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileRecord {
    /// Internal profile id.
    pub id: String,
    /// Authentication subject id.
    pub user_id: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Store the person works at.
    #[serde(default)]
    pub store_id: Option<String>,
    /// Primary role tag.
    pub role: String,
    /// Whether the account is enabled.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Identity and organizational binding of one console user.
///
/// Only built through `TryFrom<UserProfileRecord>`:
///
/// ```compile_fail
/// let _: Result<shopdesk_domain::UserProfile, _> = serde_json::from_str("{}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    id: ProfileId,
    user_id: SubjectId,
    email: Option<EmailAddress>,
    full_name: Option<String>,
    phone: Option<String>,
    store_id: Option<StoreId>,
    role: UserRole,
    is_active: Option<bool>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Returns the internal profile id.
    #[must_use]
    pub fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the linked authentication subject.
    #[must_use]
    pub fn user_id(&self) -> SubjectId {
        self.user_id
    }

    /// Returns the contact email, if any.
    #[must_use]
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Returns the full name, if any.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the contact phone, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the store affiliation, if any.
    #[must_use]
    pub fn store_id(&self) -> Option<&StoreId> {
        self.store_id.as_ref()
    }

    /// Returns the primary role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the stored active flag.
    #[must_use]
    pub fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    /// Returns false only when the account was explicitly deactivated.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_active != Some(false)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl TryFrom<UserProfileRecord> for UserProfile {
    type Error = AppError;

    fn try_from(record: UserProfileRecord) -> Result<Self, Self::Error> {
        let id = ProfileId::parse(&record.id)?;
        let user_id = SubjectId::parse(&record.user_id)?;

        let role = UserRole::parse(&record.role).map_err(|_| {
            AppError::Validation(format!(
                "profile '{id}' has unknown role '{}'",
                record.role
            ))
        })?;

        let email = optional_text(record.email)
            .map(EmailAddress::new)
            .transpose()
            .map_err(|error| AppError::Validation(format!("profile '{id}': {error}")))?;

        let store_id = optional_text(record.store_id)
            .map(StoreId::new)
            .transpose()?;

        if record.updated_at < record.created_at {
            return Err(AppError::Validation(format!(
                "profile '{id}' was updated before it was created"
            )));
        }

        Ok(Self {
            id,
            user_id,
            email,
            full_name: optional_text(record.full_name),
            phone: optional_text(record.phone),
            store_id,
            role,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Trims an optional text field and drops it when blank.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use shopdesk_core::AppError;

    use super::{EmailAddress, UserProfile, UserProfileRecord};
    use crate::UserRole;

    fn record(role: &str) -> UserProfileRecord {
        let now = Utc::now();
        UserProfileRecord {
            id: "0b4f3c52-5c1e-4a38-9a54-4d5e2f0e7c11".to_owned(),
            user_id: "9d1c2a7e-0f3b-4b6d-8e2a-1c5f7a9b3d20".to_owned(),
            email: Some(" Manager@Example.COM ".to_owned()),
            full_name: Some("  Li Wei ".to_owned()),
            phone: Some("   ".to_owned()),
            store_id: Some("store-1".to_owned()),
            role: role.to_owned(),
            is_active: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn valid_record_converts_and_normalizes_fields() {
        let profile = UserProfile::try_from(record("store_manager"))
            .unwrap_or_else(|error| panic!("conversion failed: {error}"));

        assert_eq!(profile.role(), UserRole::StoreManager);
        assert_eq!(
            profile.email().map(EmailAddress::as_str),
            Some("manager@example.com")
        );
        assert_eq!(profile.full_name(), Some("Li Wei"));
        assert_eq!(profile.phone(), None);
        assert_eq!(profile.store_id().map(|id| id.as_str()), Some("store-1"));
        assert!(profile.is_enabled());
    }

    #[test]
    fn unknown_role_is_a_validation_error_naming_the_profile() {
        let result = UserProfile::try_from(record("super_admin"));
        assert!(matches!(
            result,
            Err(AppError::Validation(message))
                if message.contains("super_admin") && message.contains("0b4f3c52")
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut value = record("store_staff");
        value.email = Some("not-an-email".to_owned());
        assert!(UserProfile::try_from(value).is_err());
    }

    #[test]
    fn update_before_creation_is_rejected() {
        let mut value = record("store_staff");
        value.updated_at = value.created_at - Duration::seconds(1);
        assert!(UserProfile::try_from(value).is_err());
    }

    #[test]
    fn explicit_deactivation_disables_profile() {
        let mut value = record("store_staff");
        value.is_active = Some(false);
        let profile = UserProfile::try_from(value);
        assert!(matches!(profile, Ok(profile) if !profile.is_enabled()));
    }

    #[test]
    fn record_deserializes_without_optional_fields() {
        let payload = r#"{
            "id": "0b4f3c52-5c1e-4a38-9a54-4d5e2f0e7c11",
            "user_id": "9d1c2a7e-0f3b-4b6d-8e2a-1c5f7a9b3d20",
            "role": "hq_admin",
            "created_at": "2024-03-01T08:00:00Z",
            "updated_at": "2024-03-02T08:00:00Z"
        }"#;

        let parsed: Result<UserProfileRecord, _> = serde_json::from_str(payload);
        assert!(matches!(parsed, Ok(value) if value.email.is_none() && value.role == "hq_admin"));
    }

    #[test]
    fn email_with_two_at_signs_is_rejected() {
        assert!(EmailAddress::new("a@b@example.com").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@nodot").is_err());
    }
}
