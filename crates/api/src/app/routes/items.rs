use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use goodbank_catalog::{BaseItemId, ProductGroup};
use goodbank_core::{AggregateId, OrganizationId};
use goodbank_inventory::{ItemId, ItemStore, NewItem};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_item).get(list_items))
        .route("/reactivate", post(reactivate_items))
        .route("/:id", get(get_item).delete(destroy_item))
        .route("/:id/deactivate", post(deactivate_item))
        .route("/:id/reactivate", post(reactivate_item))
        .route("/:id/rename", post(rename_item))
        .route("/:id/classification", get(get_classification))
}

fn parse_organization_id(raw: &str) -> Result<OrganizationId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid organization id")
    })
}

fn parse_item_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse::<AggregateId>().map(ItemId::new).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id")
    })
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(organization_id): Path<String>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    let organization_id = match parse_organization_id(&organization_id) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let base_item_id = match body.base_item_id.as_deref() {
        Some(raw) => match raw.parse::<AggregateId>() {
            Ok(v) => Some(BaseItemId::new(v)),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid base item id",
                )
            }
        },
        None => None,
    };

    let new = NewItem {
        name: body.name,
        base_item_id,
        distribution_quantity: body.distribution_quantity,
        on_hand_minimum_quantity: body.on_hand_minimum_quantity,
        on_hand_recommended_quantity: body.on_hand_recommended_quantity,
        package_size: body.package_size,
        barcode_count: body.barcode_count,
        additional_info: body.additional_info,
        value_in_cents: body.value_in_cents,
        visible_to_partners: body.visible_to_partners,
    };

    match services.engine.create_item(organization_id, new) {
        Ok(item) => (StatusCode::CREATED, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(organization_id): Path<String>,
    Query(query): Query<dto::ListItemsQuery>,
) -> axum::response::Response {
    let organization_id = match parse_organization_id(&organization_id) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let items = if let Some(raw) = query.base_item_id.as_deref() {
        match raw.parse::<AggregateId>() {
            Ok(v) => services
                .queries
                .by_base_item(organization_id, BaseItemId::new(v)),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid base item id",
                )
            }
        }
    } else if let Some(partner_key) = query.partner_key.as_deref() {
        services.queries.by_partner_key(organization_id, partner_key)
    } else if let Some(size) = query.size.as_deref() {
        services.queries.by_size(organization_id, size)
    } else if let Some(group) = query.group.as_deref() {
        let group = match group {
            "disposable" => ProductGroup::Disposable,
            "cloth_diapers" => ProductGroup::ClothDiapers,
            "adult_incontinence" => ProductGroup::AdultIncontinence,
            "period_supplies" => ProductGroup::PeriodSupplies,
            _ => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_group",
                    "group must be one of: disposable, cloth_diapers, adult_incontinence, period_supplies",
                )
            }
        };
        services.queries.in_group(organization_id, group)
    } else {
        match query.scope.as_deref() {
            None => services.queries.alphabetized(organization_id),
            Some("active") => services.queries.active(organization_id),
            Some("loose") => services.queries.loose(organization_id),
            Some("housing_a_kit") => services.queries.housing_a_kit(organization_id),
            Some("visible") => services.queries.visible_to_partners(organization_id),
            Some(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_scope",
                    "scope must be one of: active, loose, housing_a_kit, visible",
                )
            }
        }
    };

    let body: Vec<_> = items.iter().map(dto::item_to_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": body }))).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> axum::response::Response {
    let (organization_id, item_id) =
        match (parse_organization_id(&organization_id), parse_item_id(&id)) {
            (Ok(org), Ok(item)) => (org, item),
            (Err(e), _) | (_, Err(e)) => return e,
        };

    match services.items.get(organization_id, item_id) {
        Some(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
    }
}

pub async fn deactivate_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> axum::response::Response {
    let (organization_id, item_id) =
        match (parse_organization_id(&organization_id), parse_item_id(&id)) {
            (Ok(org), Ok(item)) => (org, item),
            (Err(e), _) | (_, Err(e)) => return e,
        };

    match services.engine.deactivate_item(organization_id, item_id) {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "active": false }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn reactivate_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> axum::response::Response {
    let (organization_id, item_id) =
        match (parse_organization_id(&organization_id), parse_item_id(&id)) {
            (Ok(org), Ok(item)) => (org, item),
            (Err(e), _) | (_, Err(e)) => return e,
        };

    match services.engine.reactivate_item(organization_id, item_id) {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "active": true }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn reactivate_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(organization_id): Path<String>,
    Json(body): Json<dto::ReactivateItemsRequest>,
) -> axum::response::Response {
    let organization_id = match parse_organization_id(&organization_id) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let mut item_ids = Vec::with_capacity(body.item_ids.len());
    for raw in &body.item_ids {
        match parse_item_id(raw) {
            Ok(id) => item_ids.push(id),
            Err(e) => return e,
        }
    }

    let report = services.engine.reactivate_items(organization_id, &item_ids);
    (
        StatusCode::OK,
        Json(dto::reactivation_report_to_json(&report)),
    )
        .into_response()
}

pub async fn rename_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((organization_id, id)): Path<(String, String)>,
    Json(body): Json<dto::RenameItemRequest>,
) -> axum::response::Response {
    let (organization_id, item_id) =
        match (parse_organization_id(&organization_id), parse_item_id(&id)) {
            (Ok(org), Ok(item)) => (org, item),
            (Err(e), _) | (_, Err(e)) => return e,
        };

    match services.engine.rename_item(organization_id, item_id, &body.name) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn destroy_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> axum::response::Response {
    let (organization_id, item_id) =
        match (parse_organization_id(&organization_id), parse_item_id(&id)) {
            (Ok(org), Ok(item)) => (org, item),
            (Err(e), _) | (_, Err(e)) => return e,
        };

    match services.engine.destroy_item(organization_id, item_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_classification(
    Extension(services): Extension<Arc<AppServices>>,
    Path((organization_id, id)): Path<(String, String)>,
) -> axum::response::Response {
    let (organization_id, item_id) =
        match (parse_organization_id(&organization_id), parse_item_id(&id)) {
            (Ok(org), Ok(item)) => (org, item),
            (Err(e), _) | (_, Err(e)) => return e,
        };

    match services.engine.classification(organization_id, item_id) {
        Ok(Some(classification)) => (
            StatusCode::OK,
            Json(dto::classification_to_json(&classification)),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::OK,
            Json(serde_json::json!({ "classification": null })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
