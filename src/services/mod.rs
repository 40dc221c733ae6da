pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod list_service;
pub mod list_service_impl;
pub use list_service::{AddOutcome, ListError, ListKind, ListService, RemoveOutcome};
pub use list_service_impl::SeaOrmListService;
