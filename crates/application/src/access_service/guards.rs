use super::*;

impl AccessService {
    /// Returns whether the subject holds a permission within a scope.
    ///
    /// Unknown, deactivated and malformed subjects hold nothing.
    pub async fn has_permission(
        &self,
        subject: SubjectId,
        permission: Permission,
        scope: &RoleScope,
    ) -> AppResult<bool> {
        let access = self.resolve(subject).await?;

        match access.role_for_scope(scope) {
            Some(role) => self.catalog.has_permission(role, permission),
            None => Ok(false),
        }
    }

    /// Ensures the subject holds a permission within a scope.
    pub async fn require_permission(
        &self,
        subject: SubjectId,
        permission: Permission,
        scope: &RoleScope,
    ) -> AppResult<()> {
        if self.has_permission(subject, permission, scope).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{subject}' is missing permission '{permission}' in scope '{scope}'"
        )))
    }

    /// Ensures the subject holds at least one of the roles, as primary role or
    /// through any scoped grant.
    pub async fn require_any_role(&self, subject: SubjectId, roles: &[UserRole]) -> AppResult<()> {
        let access = self.resolve(subject).await?;

        if access.held_roles().any(|role| roles.contains(&role)) {
            return Ok(());
        }

        let required = roles
            .iter()
            .map(UserRole::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Err(AppError::Forbidden(format!(
            "subject '{subject}' holds none of the roles [{required}]"
        )))
    }

    /// Ensures the subject's primary role or one of its scoped grants opens a
    /// console area.
    pub async fn require_area(&self, subject: SubjectId, area: ConsoleArea) -> AppResult<()> {
        let access = self.resolve(subject).await?;

        if access.areas.contains(&area) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{subject}' may not open console area '{}'",
            area.as_str()
        )))
    }
}
