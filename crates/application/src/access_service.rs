use std::sync::Arc;

use shopdesk_core::{AppError, AppResult};
use shopdesk_domain::{
    ConsoleArea, Permission, RejectedGrant, RoleCatalog, RoleDisplayName, RoleScope, SubjectId,
    UserProfile, UserRole, UserRoleGrant,
};
use tracing::{debug, warn};

use crate::DirectoryRepository;

mod guards;

/// Why a subject resolved to the no-access state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenial {
    /// No profile exists for the subject.
    UnknownSubject,
    /// The profile was explicitly deactivated.
    InactiveProfile,
    /// The stored profile failed validation.
    InvalidProfile(String),
}

impl AccessDenial {
    /// Returns a stable transport value for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownSubject => "unknown_subject",
            Self::InactiveProfile => "inactive_profile",
            Self::InvalidProfile(_) => "invalid_profile",
        }
    }
}

/// Everything the console needs to gate navigation for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveAccess {
    /// Subject the access was resolved for.
    pub subject: SubjectId,
    /// Validated profile, absent when access is denied.
    pub profile: Option<UserProfile>,
    /// Primary role, absent when access is denied.
    pub role: Option<UserRole>,
    /// Display labels for the primary role.
    pub display_name: Option<RoleDisplayName>,
    /// Permissions of the primary role, in authored order.
    pub permissions: Vec<Permission>,
    /// Console areas opened by the primary role or any scoped grant.
    pub areas: Vec<ConsoleArea>,
    /// Scoped grants that passed validation.
    pub scoped_roles: Vec<UserRoleGrant>,
    /// Grant rows that failed validation. Every scope they name resolves to
    /// no role.
    pub rejected_grants: Vec<RejectedGrant>,
    /// Set when the subject resolved to the no-access state.
    pub denial: Option<AccessDenial>,
}

impl EffectiveAccess {
    /// Returns the no-permissions state for a subject.
    #[must_use]
    pub fn denied(subject: SubjectId, denial: AccessDenial) -> Self {
        Self {
            subject,
            profile: None,
            role: None,
            display_name: None,
            permissions: Vec::new(),
            areas: Vec::new(),
            scoped_roles: Vec::new(),
            rejected_grants: Vec::new(),
            denial: Some(denial),
        }
    }

    /// Returns whether the subject resolved to the no-access state.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        self.denial.is_some()
    }

    /// Returns the role that applies within a scope.
    ///
    /// A scope named by a rejected grant row has no role. Otherwise a grant
    /// bound to exactly this scope wins, then the primary role applies.
    #[must_use]
    pub fn role_for_scope(&self, scope: &RoleScope) -> Option<UserRole> {
        if self.is_denied() || self.rejected_grants.iter().any(|grant| grant.covers(scope)) {
            return None;
        }

        self.scoped_roles
            .iter()
            .find(|grant| grant.scope() == scope)
            .map(UserRoleGrant::role)
            .or(self.role)
    }

    /// Returns every role the subject holds anywhere.
    pub fn held_roles(&self) -> impl Iterator<Item = UserRole> + '_ {
        self.role
            .into_iter()
            .chain(self.scoped_roles.iter().map(UserRoleGrant::role))
    }
}

/// Application service resolving role-based access for console subjects.
#[derive(Clone)]
pub struct AccessService {
    repository: Arc<dyn DirectoryRepository>,
    catalog: &'static RoleCatalog,
}

impl AccessService {
    /// Creates a service backed by the built-in role catalog.
    #[must_use]
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self::with_catalog(repository, RoleCatalog::builtin())
    }

    /// Creates a service backed by a specific role catalog.
    #[must_use]
    pub fn with_catalog(
        repository: Arc<dyn DirectoryRepository>,
        catalog: &'static RoleCatalog,
    ) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    /// Resolves effective access for a subject.
    ///
    /// Unknown subjects are `NotFound`. Deactivated or malformed profiles
    /// resolve to [`EffectiveAccess::denied`] instead of failing.
    pub async fn effective_access(&self, subject: SubjectId) -> AppResult<EffectiveAccess> {
        let access = self.resolve(subject).await?;
        if access.denial == Some(AccessDenial::UnknownSubject) {
            return Err(AppError::NotFound(format!(
                "no profile exists for subject '{subject}'"
            )));
        }

        Ok(access)
    }

    /// Returns the role that applies for a subject within a scope.
    pub async fn role_for_scope(
        &self,
        subject: SubjectId,
        scope: &RoleScope,
    ) -> AppResult<Option<UserRole>> {
        Ok(self.resolve(subject).await?.role_for_scope(scope))
    }

    async fn resolve(&self, subject: SubjectId) -> AppResult<EffectiveAccess> {
        let profile = match self.repository.find_profile(subject).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                debug!(%subject, "no profile found for subject");
                return Ok(EffectiveAccess::denied(
                    subject,
                    AccessDenial::UnknownSubject,
                ));
            }
            Err(AppError::Validation(message)) => {
                warn!(%subject, %message, "profile failed validation, denying access");
                return Ok(EffectiveAccess::denied(
                    subject,
                    AccessDenial::InvalidProfile(message),
                ));
            }
            Err(error) => return Err(error),
        };

        if profile.user_id() != subject {
            let message = format!(
                "profile '{}' belongs to subject '{}'",
                profile.id(),
                profile.user_id()
            );
            warn!(%subject, %message, "profile is linked to another subject, denying access");
            return Ok(EffectiveAccess::denied(
                subject,
                AccessDenial::InvalidProfile(message),
            ));
        }

        if !profile.is_enabled() {
            debug!(%subject, "profile is deactivated, denying access");
            return Ok(EffectiveAccess::denied(
                subject,
                AccessDenial::InactiveProfile,
            ));
        }

        let mut scoped_roles = Vec::new();
        let mut rejected_grants = Vec::new();
        for row in self.repository.list_role_grants(subject).await? {
            match row {
                Ok(grant) if grant.user_id() == subject => scoped_roles.push(grant),
                Ok(grant) => rejected_grants.push(RejectedGrant::new(
                    grant.id().to_string(),
                    vec![grant.scope().clone()],
                    format!("grant '{}' belongs to subject '{}'", grant.id(), grant.user_id()),
                )),
                Err(rejected) => rejected_grants.push(rejected),
            }
        }

        for rejected in &rejected_grants {
            warn!(
                %subject,
                record_id = rejected.record_id(),
                reason = rejected.reason(),
                "role grant failed validation, its scopes resolve to no role"
            );
        }

        let role = profile.role();
        let held_roles: Vec<UserRole> = std::iter::once(role)
            .chain(scoped_roles.iter().map(UserRoleGrant::role))
            .collect();

        Ok(EffectiveAccess {
            subject,
            role: Some(role),
            display_name: Some(*self.catalog.display_name(role)?),
            permissions: self.catalog.permissions(role)?.to_vec(),
            areas: self.catalog.accessible_areas_for_roles(&held_roles)?,
            profile: Some(profile),
            scoped_roles,
            rejected_grants,
            denial: None,
        })
    }
}

#[cfg(test)]
mod tests;
