use shopdesk_application::AccessService;
use shopdesk_domain::RoleCatalog;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub role_catalog: &'static RoleCatalog,
}
