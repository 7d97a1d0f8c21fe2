use axum::Router;

pub mod base_items;
pub mod items;
pub mod kits;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .nest("/base_items", base_items::router())
        .nest("/organizations/:organization_id/items", items::router())
        .nest("/organizations/:organization_id/kits", kits::router())
}
