use async_trait::async_trait;
use shopdesk_core::AppResult;
use shopdesk_domain::{RejectedGrant, SubjectId, UserProfile, UserRoleGrant};

/// Repository port over the identity backend's profile and grant rows.
///
/// Implementations convert raw rows into domain values. A profile row that
/// fails conversion is reported as `AppError::Validation` naming the record.
/// Grant rows are converted one at a time so a malformed row is returned as a
/// [`RejectedGrant`] next to the rows that converted.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Finds the profile linked to an authentication subject.
    async fn find_profile(&self, subject: SubjectId) -> AppResult<Option<UserProfile>>;

    /// Lists the scoped role grant rows held by an authentication subject.
    async fn list_role_grants(
        &self,
        subject: SubjectId,
    ) -> AppResult<Vec<Result<UserRoleGrant, RejectedGrant>>>;
}
