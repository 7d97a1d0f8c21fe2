//! Request/response DTOs and JSON mapping helpers.

use serde::Deserialize;
use serde_json::json;

use goodbank_catalog::Classification;
use goodbank_inventory::{Item, Kit, ReactivationReport};

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub base_item_id: Option<String>,
    pub distribution_quantity: Option<i64>,
    #[serde(default)]
    pub on_hand_minimum_quantity: i64,
    pub on_hand_recommended_quantity: Option<i64>,
    pub package_size: Option<i64>,
    pub barcode_count: Option<i64>,
    #[serde(default)]
    pub additional_info: String,
    #[serde(default)]
    pub value_in_cents: i64,
    #[serde(default = "default_visible")]
    pub visible_to_partners: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RenameItemRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ReactivateItemsRequest {
    pub item_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateKitRequest {
    pub name: String,
    pub line_items: Vec<KitLineItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct KitLineItemRequest {
    pub item_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateBaseItemRequest {
    pub name: String,
    pub category: String,
    pub partner_key: String,
    #[serde(default)]
    pub size: String,
}

/// Optional filters for the item listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    /// One of: active, loose, housing_a_kit, visible.
    pub scope: Option<String>,
    /// One of: disposable, cloth_diapers, adult_incontinence, period_supplies.
    pub group: Option<String>,
    pub partner_key: Option<String>,
    pub size: Option<String>,
    pub base_item_id: Option<String>,
}

pub fn item_to_json(item: &Item) -> serde_json::Value {
    json!({
        "id": item.id_typed().to_string(),
        "name": item.name(),
        "active": item.is_active(),
        "base_item_id": item.base_item_id().map(|id| id.to_string()),
        "kit_id": item.kit_id().map(|id| id.to_string()),
        "distribution_quantity": item.distribution_quantity(),
        "default_quantity": item.default_quantity(),
        "on_hand_minimum_quantity": item.on_hand_minimum_quantity(),
        "on_hand_recommended_quantity": item.on_hand_recommended_quantity(),
        "package_size": item.package_size(),
        "barcode_count": item.barcode_count(),
        "additional_info": item.additional_info(),
        "reporting_category": item.reporting_category(),
        "value_in_cents": item.value_in_cents(),
        "visible_to_partners": item.visible_to_partners(),
    })
}

pub fn kit_to_json(kit: &Kit) -> serde_json::Value {
    json!({
        "id": kit.id_typed().to_string(),
        "name": kit.name(),
        "active": kit.is_active(),
        "line_items": kit
            .line_items()
            .iter()
            .map(|li| json!({
                "item_id": li.item_id.to_string(),
                "quantity": li.quantity,
            }))
            .collect::<Vec<_>>(),
    })
}

pub fn classification_to_json(classification: &Classification) -> serde_json::Value {
    json!({
        "disposable": classification.disposable,
        "cloth_diapers": classification.cloth_diapers,
        "adult_incontinence": classification.adult_incontinence,
        "period_supplies": classification.period_supplies,
        "is_other": classification.is_other,
        "reporting_category": classification.reporting_category,
    })
}

pub fn reactivation_report_to_json(report: &ReactivationReport) -> serde_json::Value {
    json!({
        "reactivated": report.reactivated.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "already_active": report.already_active.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "missing": report.missing.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "reactivated_count": report.reactivated_count(),
    })
}
