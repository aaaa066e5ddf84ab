use axum::Router;

pub mod inventory;
pub mod system;

/// Router for all service endpoints that need `AppServices`.
pub fn router() -> Router {
    Router::new().merge(inventory::router())
}
