//! Query-scope coverage over the in-memory infrastructure.

use std::sync::Arc;

use goodbank_catalog::{BaseItem, BaseItemId, ProductGroup};
use goodbank_core::{AggregateId, OrganizationId};
use goodbank_infra::{
    InMemoryBaseItemCatalog, InMemoryInventoryStore, InMemoryStockLedger, InMemoryTransactionLog,
};
use goodbank_inventory::{
    Item, ItemQueries, LifecycleEngine, LineItem, NewItem, UsageEvidence,
};

struct Harness {
    engine: LifecycleEngine,
    queries: ItemQueries,
    catalog: Arc<InMemoryBaseItemCatalog>,
    org: OrganizationId,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemoryInventoryStore::new());
        let catalog = Arc::new(InMemoryBaseItemCatalog::new());
        let ledger = Arc::new(InMemoryStockLedger::new());
        let transactions = Arc::new(InMemoryTransactionLog::new());

        let evidence = UsageEvidence::new(ledger, transactions, store.clone());
        let engine = LifecycleEngine::new(store.clone(), store.clone(), catalog.clone(), evidence);
        let queries = ItemQueries::new(store, catalog.clone());

        Self {
            engine,
            queries,
            catalog,
            org: OrganizationId::new(),
        }
    }

    fn seed_base_item(&self, category: &str, partner_key: &str, size: &str) -> BaseItemId {
        let id = BaseItemId::new(AggregateId::new());
        self.catalog.upsert(BaseItem {
            id,
            name: format!("{category} base"),
            category: category.to_string(),
            partner_key: partner_key.to_string(),
            size: size.to_string(),
        });
        id
    }

    fn create_linked(&self, name: &str, base_item_id: BaseItemId) -> Item {
        self.engine
            .create_item(self.org, NewItem::named(name).with_base_item(base_item_id))
            .unwrap()
    }
}

fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(Item::name).collect()
}

#[test]
fn alphabetized_orders_by_name() {
    let h = Harness::new();
    for name in ["Wipes", "Adult Briefs M", "Size 4 Diapers"] {
        h.engine.create_item(h.org, NewItem::named(name)).unwrap();
    }

    let items = h.queries.alphabetized(h.org);
    assert_eq!(names(&items), ["Adult Briefs M", "Size 4 Diapers", "Wipes"]);
}

#[test]
fn active_excludes_deactivated_items() {
    let h = Harness::new();
    let keep = h.engine.create_item(h.org, NewItem::named("Wipes")).unwrap();
    let drop = h
        .engine
        .create_item(h.org, NewItem::named("Pull-Ups"))
        .unwrap();
    h.engine.deactivate_item(h.org, drop.id_typed()).unwrap();

    let items = h.queries.active(h.org);
    assert_eq!(names(&items), [keep.name()]);
}

#[test]
fn loose_and_housing_a_kit_partition_by_kit_link() {
    let h = Harness::new();
    let component = h.engine.create_item(h.org, NewItem::named("Size 1")).unwrap();
    h.engine
        .create_kit(
            h.org,
            "Newborn Kit",
            vec![LineItem {
                item_id: component.id_typed(),
                quantity: 24,
            }],
        )
        .unwrap();

    assert_eq!(names(&h.queries.loose(h.org)), ["Size 1"]);
    assert_eq!(names(&h.queries.housing_a_kit(h.org)), ["Newborn Kit"]);
}

#[test]
fn visible_to_partners_filters_on_the_flag() {
    let h = Harness::new();
    h.engine.create_item(h.org, NewItem::named("Wipes")).unwrap();
    let mut hidden = NewItem::named("Damaged stock");
    hidden.visible_to_partners = false;
    h.engine.create_item(h.org, hidden).unwrap();

    assert_eq!(names(&h.queries.visible_to_partners(h.org)), ["Wipes"]);
}

#[test]
fn by_size_and_by_partner_key_join_through_the_catalog() {
    let h = Harness::new();
    let size4 = h.seed_base_item("Diapers - Childrens", "diapers", "4");
    let size6 = h.seed_base_item("Diapers - Childrens", "diapers", "6");
    let tampons = h.seed_base_item("Menstrual Supplies/Items", "tampons", "Regular");

    h.create_linked("Size 4 Diapers", size4);
    h.create_linked("Size 6 Diapers", size6);
    h.create_linked("Tampons 36ct", tampons);
    // No catalog link: never matches a joined scope.
    h.engine.create_item(h.org, NewItem::named("Blankets")).unwrap();

    assert_eq!(names(&h.queries.by_size(h.org, "4")), ["Size 4 Diapers"]);
    assert_eq!(
        names(&h.queries.by_partner_key(h.org, "diapers")),
        ["Size 4 Diapers", "Size 6 Diapers"]
    );
    assert_eq!(names(&h.queries.by_base_item(h.org, tampons)), ["Tampons 36ct"]);
}

#[test]
fn group_scopes_follow_the_classification_rules() {
    let h = Harness::new();
    let disposable = h.seed_base_item("Diapers - Childrens", "diapers", "4");
    let cloth = h.seed_base_item("Diapers - Cloth (Kids)", "cloth_diapers", "M");
    let adult = h.seed_base_item("Incontinence Pads - Adult", "ai_liners", "One Size");
    let period = h.seed_base_item("Menstrual Supplies/Items", "liners", "Regular");
    let unmatched = h.seed_base_item("Wipes - Adults", "adult_wipes", "One Size");

    h.create_linked("Size 4 Diapers", disposable);
    h.create_linked("Cloth Covers M", cloth);
    h.create_linked("Adult Liners", adult);
    h.create_linked("Panty Liners", period);
    h.create_linked("Adult Wipes", unmatched);

    assert_eq!(names(&h.queries.disposable(h.org)), ["Size 4 Diapers"]);
    assert_eq!(names(&h.queries.cloth_diapers(h.org)), ["Cloth Covers M"]);
    // Partner key never gates groups: ai_liners lands in adult incontinence
    // by category alone.
    assert_eq!(names(&h.queries.adult_incontinence(h.org)), ["Adult Liners"]);
    assert_eq!(names(&h.queries.period_supplies(h.org)), ["Panty Liners"]);
    assert!(h
        .queries
        .in_group(h.org, ProductGroup::Disposable)
        .iter()
        .all(|item| item.name() != "Adult Wipes"));
}

#[test]
fn scopes_are_organization_scoped() {
    let h = Harness::new();
    h.engine.create_item(h.org, NewItem::named("Wipes")).unwrap();

    let other_org = OrganizationId::new();
    assert!(h.queries.alphabetized(other_org).is_empty());
}
