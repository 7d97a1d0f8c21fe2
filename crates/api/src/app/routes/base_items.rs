use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use goodbank_catalog::{classify, BaseItem, BaseItemCatalog, BaseItemId};
use goodbank_core::AggregateId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_base_item))
        .route("/:id", get(get_base_item))
}

pub async fn create_base_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateBaseItemRequest>,
) -> axum::response::Response {
    if body.name.trim().is_empty() || body.category.trim().is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "name and category are required",
        );
    }

    let id = BaseItemId::new(AggregateId::new());
    let base_item = BaseItem {
        id,
        name: body.name,
        category: body.category,
        partner_key: body.partner_key,
        size: body.size,
    };
    let classification = classify(&base_item);
    services.catalog.upsert(base_item);

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id.to_string(),
            "classification": dto::classification_to_json(&classification),
        })),
    )
        .into_response()
}

pub async fn get_base_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match id.parse::<AggregateId>() {
        Ok(v) => BaseItemId::new(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid base item id")
        }
    };

    match services.catalog.get(id) {
        Some(base_item) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": base_item.id.to_string(),
                "name": base_item.name,
                "category": base_item.category,
                "partner_key": base_item.partner_key,
                "size": base_item.size,
                "classification": dto::classification_to_json(&classify(&base_item)),
            })),
        )
            .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "base item not found"),
    }
}
