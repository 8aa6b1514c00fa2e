use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use shopdesk_application::DirectoryRepository;
use shopdesk_core::{AppError, AppResult};
use shopdesk_domain::{
    RejectedGrant, SubjectId, UserProfile, UserProfileRecord, UserRoleGrant, UserRoleGrantRecord,
};
use tokio::sync::RwLock;
use tracing::info;

/// Seed document accepted by [`InMemoryDirectoryRepository::from_seed_json`].
#[derive(Debug, Default, Deserialize)]
struct DirectorySeed {
    #[serde(default)]
    profiles: Vec<UserProfileRecord>,
    #[serde(default)]
    grants: Vec<UserRoleGrantRecord>,
}

/// In-memory directory of profile and grant rows.
///
/// Rows are stored as delivered and converted on every read. A malformed
/// profile surfaces as a validation error for its subject. A malformed grant
/// row comes back as a rejected row next to the grants that converted.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryRepository {
    profiles: RwLock<HashMap<SubjectId, UserProfileRecord>>,
    grants: RwLock<HashMap<SubjectId, Vec<UserRoleGrantRecord>>>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            grants: RwLock::new(HashMap::new()),
        }
    }

    /// Builds a directory from a JSON document of the form
    /// `{ "profiles": [...], "grants": [...] }`.
    pub fn from_seed_json(payload: &str) -> AppResult<Self> {
        let seed: DirectorySeed = serde_json::from_str(payload)
            .map_err(|error| AppError::Validation(format!("invalid directory seed: {error}")))?;

        let mut profiles = HashMap::new();
        for record in seed.profiles {
            let subject = SubjectId::parse(&record.user_id)?;
            if profiles.insert(subject, record).is_some() {
                return Err(AppError::Conflict(format!(
                    "directory seed has more than one profile for subject '{subject}'"
                )));
            }
        }

        let mut grants: HashMap<SubjectId, Vec<UserRoleGrantRecord>> = HashMap::new();
        for record in seed.grants {
            let subject = SubjectId::parse(&record.user_id)?;
            grants.entry(subject).or_default().push(record);
        }

        info!(
            profiles = profiles.len(),
            grant_subjects = grants.len(),
            "loaded directory seed"
        );

        Ok(Self {
            profiles: RwLock::new(profiles),
            grants: RwLock::new(grants),
        })
    }

    /// Stores a profile row. Fails when the subject already has one.
    pub async fn insert_profile(&self, record: UserProfileRecord) -> AppResult<()> {
        let subject = SubjectId::parse(&record.user_id)?;
        let mut profiles = self.profiles.write().await;

        if profiles.contains_key(&subject) {
            return Err(AppError::Conflict(format!(
                "profile for subject '{subject}' already exists"
            )));
        }

        profiles.insert(subject, record);
        Ok(())
    }

    /// Stores a grant row.
    pub async fn insert_grant(&self, record: UserRoleGrantRecord) -> AppResult<()> {
        let subject = SubjectId::parse(&record.user_id)?;
        self.grants
            .write()
            .await
            .entry(subject)
            .or_default()
            .push(record);
        Ok(())
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn find_profile(&self, subject: SubjectId) -> AppResult<Option<UserProfile>> {
        self.profiles
            .read()
            .await
            .get(&subject)
            .cloned()
            .map(UserProfile::try_from)
            .transpose()
    }

    async fn list_role_grants(
        &self,
        subject: SubjectId,
    ) -> AppResult<Vec<Result<UserRoleGrant, RejectedGrant>>> {
        Ok(self
            .grants
            .read()
            .await
            .get(&subject)
            .map(|records| {
                records
                    .iter()
                    .cloned()
                    .map(UserRoleGrantRecord::into_grant)
                    .collect()
            })
            .unwrap_or_default())
    }
}
