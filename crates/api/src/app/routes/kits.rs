use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use goodbank_core::{AggregateId, OrganizationId};
use goodbank_inventory::{ItemId, KitId, KitStore, LineItem};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_kit).get(list_kits))
        .route("/:id", get(get_kit))
}

fn parse_organization_id(raw: &str) -> Result<OrganizationId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid organization id")
    })
}

pub async fn create_kit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(organization_id): Path<String>,
    Json(body): Json<dto::CreateKitRequest>,
) -> axum::response::Response {
    let organization_id = match parse_organization_id(&organization_id) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let mut line_items = Vec::with_capacity(body.line_items.len());
    for li in &body.line_items {
        match li.item_id.parse::<AggregateId>() {
            Ok(id) => line_items.push(LineItem {
                item_id: ItemId::new(id),
                quantity: li.quantity,
            }),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid line item id",
                )
            }
        }
    }

    match services.engine.create_kit(organization_id, &body.name, line_items) {
        Ok((kit, backing)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "kit": dto::kit_to_json(&kit),
                "item": dto::item_to_json(&backing),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_kits(
    Extension(services): Extension<Arc<AppServices>>,
    Path(organization_id): Path<String>,
) -> axum::response::Response {
    let organization_id = match parse_organization_id(&organization_id) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let mut kits = services.kits.list(organization_id);
    kits.sort_by(|a, b| a.name().cmp(b.name()));
    let body: Vec<_> = kits.iter().map(dto::kit_to_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "kits": body }))).into_response()
}

pub async fn get_kit(
    Extension(services): Extension<Arc<AppServices>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> axum::response::Response {
    let organization_id = match parse_organization_id(&organization_id) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let kit_id = match id.parse::<AggregateId>() {
        Ok(v) => KitId::new(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid kit id")
        }
    };

    match services.kits.get(organization_id, kit_id) {
        Some(kit) => (StatusCode::OK, Json(dto::kit_to_json(&kit))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "kit not found"),
    }
}
