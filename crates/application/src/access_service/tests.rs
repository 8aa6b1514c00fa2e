use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shopdesk_core::{AppError, AppResult};
use shopdesk_domain::{
    ConsoleArea, Permission, RejectedGrant, RoleScope, StoreId, SubjectId, UserProfile,
    UserProfileRecord, UserRole, UserRoleGrant, UserRoleGrantRecord, WarehouseId,
};
use tokio::sync::Mutex;

use crate::DirectoryRepository;

use super::{AccessDenial, AccessService};

#[derive(Default)]
struct FakeDirectoryRepository {
    profiles: HashMap<SubjectId, UserProfileRecord>,
    grants: HashMap<SubjectId, Vec<Result<UserRoleGrant, RejectedGrant>>>,
    lookups: Mutex<usize>,
}

impl FakeDirectoryRepository {
    fn with_profile(mut self, subject: SubjectId, role: &str, is_active: Option<bool>) -> Self {
        let now = Utc::now();
        self.profiles.insert(
            subject,
            UserProfileRecord {
                id: "0b4f3c52-5c1e-4a38-9a54-4d5e2f0e7c11".to_owned(),
                user_id: subject.to_string(),
                email: None,
                full_name: Some("Test User".to_owned()),
                phone: None,
                store_id: Some("store-1".to_owned()),
                role: role.to_owned(),
                is_active,
                created_at: now,
                updated_at: now,
            },
        );
        self
    }

    fn with_grant(mut self, subject: SubjectId, role: UserRole, scope: RoleScope) -> Self {
        self.grants
            .entry(subject)
            .or_default()
            .push(Ok(UserRoleGrant::new(subject, role, scope)));
        self
    }

    fn with_grant_row(
        mut self,
        subject: SubjectId,
        role: &str,
        store_id: Option<&str>,
        warehouse_id: Option<&str>,
    ) -> Self {
        let record = UserRoleGrantRecord {
            id: "5a0d8c1e-2b7f-4e39-91a4-6c3d2e1f0b88".to_owned(),
            user_id: subject.to_string(),
            role: role.to_owned(),
            store_id: store_id.map(str::to_owned),
            warehouse_id: warehouse_id.map(str::to_owned),
            created_at: Utc::now(),
        };
        self.grants
            .entry(subject)
            .or_default()
            .push(record.into_grant());
        self
    }
}

#[async_trait]
impl DirectoryRepository for FakeDirectoryRepository {
    async fn find_profile(&self, subject: SubjectId) -> AppResult<Option<UserProfile>> {
        *self.lookups.lock().await += 1;
        self.profiles
            .get(&subject)
            .cloned()
            .map(UserProfile::try_from)
            .transpose()
    }

    async fn list_role_grants(
        &self,
        subject: SubjectId,
    ) -> AppResult<Vec<Result<UserRoleGrant, RejectedGrant>>> {
        Ok(self.grants.get(&subject).cloned().unwrap_or_default())
    }
}

struct FailingDirectoryRepository;

#[async_trait]
impl DirectoryRepository for FailingDirectoryRepository {
    async fn find_profile(&self, _subject: SubjectId) -> AppResult<Option<UserProfile>> {
        Err(AppError::Internal("directory offline".to_owned()))
    }

    async fn list_role_grants(
        &self,
        _subject: SubjectId,
    ) -> AppResult<Vec<Result<UserRoleGrant, RejectedGrant>>> {
        Ok(Vec::new())
    }
}

fn warehouse(value: &str) -> RoleScope {
    RoleScope::Warehouse(
        WarehouseId::new(value).unwrap_or_else(|error| panic!("bad warehouse id: {error}")),
    )
}

fn store(value: &str) -> RoleScope {
    RoleScope::Store(StoreId::new(value).unwrap_or_else(|error| panic!("bad store id: {error}")))
}

#[tokio::test]
async fn effective_access_resolves_role_tables() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default().with_profile(subject, "store_staff", None);
    let service = AccessService::new(Arc::new(repository));

    let access = service
        .effective_access(subject)
        .await
        .unwrap_or_else(|error| panic!("access failed: {error}"));

    assert_eq!(access.role, Some(UserRole::StoreStaff));
    assert_eq!(
        access.permissions,
        vec![
            Permission::ViewStore,
            Permission::CreateOrders,
            Permission::ViewInventory
        ]
    );
    assert_eq!(access.display_name.map(|name| name.en()), Some("Store Staff"));
    assert_eq!(
        access
            .profile
            .as_ref()
            .and_then(UserProfile::store_id)
            .map(StoreId::as_str),
        Some("store-1")
    );
    assert_eq!(access.profile.as_ref().map(UserProfile::user_id), Some(subject));
    assert!(access.areas.contains(&ConsoleArea::PurchaseOrders));
    assert!(!access.is_denied());
}

#[tokio::test]
async fn unknown_subject_is_not_found() {
    let service = AccessService::new(Arc::new(FakeDirectoryRepository::default()));

    let result = service.effective_access(SubjectId::new()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn out_of_vocabulary_role_degrades_to_denied_access() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default().with_profile(subject, "super_admin", None);
    let service = AccessService::new(Arc::new(repository));

    let access = service
        .effective_access(subject)
        .await
        .unwrap_or_else(|error| panic!("access failed: {error}"));

    assert!(access.is_denied());
    assert!(matches!(
        access.denial,
        Some(AccessDenial::InvalidProfile(ref message)) if message.contains("super_admin")
    ));
    assert!(access.permissions.is_empty());
    assert!(access.areas.is_empty());
}

#[tokio::test]
async fn deactivated_profile_holds_no_permissions() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default().with_profile(subject, "hq_admin", Some(false));
    let service = AccessService::new(Arc::new(repository));

    let granted = service
        .has_permission(subject, Permission::ViewAll, &RoleScope::Organization)
        .await;
    assert!(matches!(granted, Ok(false)));

    let access = service.effective_access(subject).await;
    assert!(matches!(
        access,
        Ok(access) if access.denial == Some(AccessDenial::InactiveProfile)
    ));
}

#[tokio::test]
async fn require_permission_denies_missing_grant() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default().with_profile(subject, "store_staff", None);
    let service = AccessService::new(Arc::new(repository));

    let allowed = service
        .require_permission(subject, Permission::CreateOrders, &RoleScope::Organization)
        .await;
    assert!(allowed.is_ok());

    let denied = service
        .require_permission(subject, Permission::CreateTransfers, &RoleScope::Organization)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(message)) if message.contains("create_transfers")));
}

#[tokio::test]
async fn scoped_grant_applies_only_to_its_scope() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default()
        .with_profile(subject, "store_staff", None)
        .with_grant(subject, UserRole::WarehouseAdmin, warehouse("wh-east"));
    let service = AccessService::new(Arc::new(repository));

    let in_scope = service
        .has_permission(subject, Permission::CreateTransfers, &warehouse("wh-east"))
        .await;
    assert!(matches!(in_scope, Ok(true)));

    let other_warehouse = service
        .has_permission(subject, Permission::CreateTransfers, &warehouse("wh-west"))
        .await;
    assert!(matches!(other_warehouse, Ok(false)));

    let store_scope = service
        .role_for_scope(subject, &store("store-1"))
        .await;
    assert!(matches!(store_scope, Ok(Some(UserRole::StoreStaff))));
}

#[tokio::test]
async fn require_any_role_accepts_scoped_grants() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default()
        .with_profile(subject, "store_staff", None)
        .with_grant(subject, UserRole::StoreManager, store("store-2"));
    let service = AccessService::new(Arc::new(repository));

    assert!(
        service
            .require_any_role(subject, &[UserRole::StoreManager, UserRole::HqAdmin])
            .await
            .is_ok()
    );
    assert!(matches!(
        service.require_any_role(subject, &[UserRole::HqAdmin]).await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn require_area_follows_primary_role() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default().with_profile(subject, "warehouse_admin", None);
    let service = AccessService::new(Arc::new(repository));

    assert!(
        service
            .require_area(subject, ConsoleArea::Transfers)
            .await
            .is_ok()
    );
    assert!(matches!(
        service.require_area(subject, ConsoleArea::Users).await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn scoped_grant_opens_the_areas_of_its_role() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default()
        .with_profile(subject, "store_manager", None)
        .with_grant(subject, UserRole::WarehouseAdmin, warehouse("wh-east"));
    let service = AccessService::new(Arc::new(repository));

    let granted = service
        .has_permission(subject, Permission::CreateTransfers, &warehouse("wh-east"))
        .await;
    assert!(matches!(granted, Ok(true)));
    assert!(
        service
            .require_area(subject, ConsoleArea::Transfers)
            .await
            .is_ok()
    );
    assert!(matches!(
        service.require_area(subject, ConsoleArea::Users).await,
        Err(AppError::Forbidden(_))
    ));

    let access = service
        .effective_access(subject)
        .await
        .unwrap_or_else(|error| panic!("access failed: {error}"));
    assert!(access.areas.contains(&ConsoleArea::Transfers));
    assert!(access.areas.contains(&ConsoleArea::Staff));
    assert!(!access.permissions.contains(&Permission::CreateTransfers));
}

#[tokio::test]
async fn malformed_grant_does_not_undo_a_valid_scoped_demotion() {
    let subject = SubjectId::new();
    let only_demotion = FakeDirectoryRepository::default()
        .with_profile(subject, "hq_admin", None)
        .with_grant(subject, UserRole::StoreStaff, store("store-1"));
    let with_malformed_row = FakeDirectoryRepository::default()
        .with_profile(subject, "hq_admin", None)
        .with_grant(subject, UserRole::StoreStaff, store("store-1"))
        .with_grant_row(subject, "super_admin", None, Some("wh-9"));

    for repository in [only_demotion, with_malformed_row] {
        let service = AccessService::new(Arc::new(repository));
        let granted = service
            .has_permission(subject, Permission::ManageAll, &store("store-1"))
            .await;
        assert!(matches!(granted, Ok(false)));
    }
}

#[tokio::test]
async fn scope_named_by_malformed_grant_resolves_to_no_role() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default()
        .with_profile(subject, "hq_admin", None)
        .with_grant(subject, UserRole::WarehouseAdmin, warehouse("wh-9"))
        .with_grant_row(subject, "super_admin", None, Some("wh-9"));
    let service = AccessService::new(Arc::new(repository));

    let in_rejected_scope = service
        .has_permission(subject, Permission::ViewWarehouse, &warehouse("wh-9"))
        .await;
    assert!(matches!(in_rejected_scope, Ok(false)));
    assert!(matches!(
        service.role_for_scope(subject, &warehouse("wh-9")).await,
        Ok(None)
    ));

    let organization = service
        .has_permission(subject, Permission::ManageAll, &RoleScope::Organization)
        .await;
    assert!(matches!(organization, Ok(true)));

    let access = service
        .effective_access(subject)
        .await
        .unwrap_or_else(|error| panic!("access failed: {error}"));
    assert!(!access.is_denied());
    assert_eq!(access.scoped_roles.len(), 1);
    assert_eq!(access.rejected_grants.len(), 1);
    assert!(access.rejected_grants[0].reason().contains("super_admin"));
}

#[tokio::test]
async fn grant_row_with_two_scopes_blocks_both() {
    let subject = SubjectId::new();
    let repository = FakeDirectoryRepository::default()
        .with_profile(subject, "store_manager", None)
        .with_grant_row(subject, "store_staff", Some("store-1"), Some("wh-east"));
    let service = AccessService::new(Arc::new(repository));

    assert!(matches!(
        service.role_for_scope(subject, &store("store-1")).await,
        Ok(None)
    ));
    assert!(matches!(
        service.role_for_scope(subject, &warehouse("wh-east")).await,
        Ok(None)
    ));
    assert!(matches!(
        service.role_for_scope(subject, &store("store-2")).await,
        Ok(Some(UserRole::StoreManager))
    ));
}

#[tokio::test]
async fn grant_for_another_subject_is_rejected() {
    let subject = SubjectId::new();
    let mut repository = FakeDirectoryRepository::default()
        .with_profile(subject, "store_staff", None)
        .with_grant(subject, UserRole::StoreManager, store("store-1"));
    repository
        .grants
        .entry(subject)
        .or_default()
        .push(Ok(UserRoleGrant::new(
            SubjectId::new(),
            UserRole::HqAdmin,
            store("store-2"),
        )));
    let service = AccessService::new(Arc::new(repository));

    let access = service
        .effective_access(subject)
        .await
        .unwrap_or_else(|error| panic!("access failed: {error}"));
    assert_eq!(access.scoped_roles.len(), 1);
    assert_eq!(access.rejected_grants.len(), 1);
    assert!(matches!(
        service.role_for_scope(subject, &store("store-2")).await,
        Ok(None)
    ));
}

#[tokio::test]
async fn unknown_subject_fails_guards_as_forbidden() {
    let service = AccessService::new(Arc::new(FakeDirectoryRepository::default()));

    let result = service
        .require_permission(SubjectId::new(), Permission::ViewStore, &RoleScope::Organization)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn repository_failures_propagate() {
    let service = AccessService::new(Arc::new(FailingDirectoryRepository));

    let result = service.effective_access(SubjectId::new()).await;
    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn every_check_reads_the_directory() {
    let subject = SubjectId::new();
    let repository =
        Arc::new(FakeDirectoryRepository::default().with_profile(subject, "hq_admin", None));
    let service = AccessService::new(repository.clone());

    for _ in 0..3 {
        assert!(
            service
                .require_area(subject, ConsoleArea::Stores)
                .await
                .is_ok()
        );
    }

    assert_eq!(*repository.lookups.lock().await, 3);
}
