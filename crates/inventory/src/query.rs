//! Query scopes over an organization's items.
//!
//! Scopes are read-only filters layered on the item store, with catalog joins
//! for the scopes that depend on base-item metadata. Results are plain `Vec`s;
//! pagination and serialization belong to the callers.

use std::sync::Arc;

use goodbank_catalog::{BaseItemCatalog, BaseItemId, ProductGroup};
use goodbank_core::OrganizationId;

use crate::item::Item;
use crate::store::ItemStore;

pub struct ItemQueries {
    items: Arc<dyn ItemStore>,
    catalog: Arc<dyn BaseItemCatalog>,
}

impl ItemQueries {
    pub fn new(items: Arc<dyn ItemStore>, catalog: Arc<dyn BaseItemCatalog>) -> Self {
        Self { items, catalog }
    }

    /// All items of the organization, ordered by name.
    pub fn alphabetized(&self, organization_id: OrganizationId) -> Vec<Item> {
        let mut items = self.items.list(organization_id);
        items.sort_by(|a, b| a.name().cmp(b.name()));
        items
    }

    /// Items currently available for distribution and intake.
    pub fn active(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.filtered(organization_id, |item| item.is_active())
    }

    /// Items that do not back a kit.
    pub fn loose(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.filtered(organization_id, |item| !item.is_kit_backing())
    }

    /// Items that back a kit.
    pub fn housing_a_kit(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.filtered(organization_id, Item::is_kit_backing)
    }

    /// Items visible in partner-facing listings.
    pub fn visible_to_partners(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.filtered(organization_id, Item::visible_to_partners)
    }

    /// Items whose linked base item carries the given size label.
    pub fn by_size(&self, organization_id: OrganizationId, size: &str) -> Vec<Item> {
        self.filtered_by_base(organization_id, |base| base.size == size)
    }

    /// Items linked to the given base item.
    pub fn by_base_item(
        &self,
        organization_id: OrganizationId,
        base_item_id: BaseItemId,
    ) -> Vec<Item> {
        self.filtered(organization_id, |item| {
            item.base_item_id() == Some(base_item_id)
        })
    }

    /// Items whose linked base item carries the given partner key.
    pub fn by_partner_key(&self, organization_id: OrganizationId, partner_key: &str) -> Vec<Item> {
        self.filtered_by_base(organization_id, |base| base.partner_key == partner_key)
    }

    /// Items whose linked base item's category belongs to the given group.
    /// Items without a catalog link never qualify.
    pub fn in_group(&self, organization_id: OrganizationId, group: ProductGroup) -> Vec<Item> {
        self.filtered_by_base(organization_id, |base| group.matches(&base.category))
    }

    pub fn disposable(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.in_group(organization_id, ProductGroup::Disposable)
    }

    pub fn cloth_diapers(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.in_group(organization_id, ProductGroup::ClothDiapers)
    }

    pub fn adult_incontinence(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.in_group(organization_id, ProductGroup::AdultIncontinence)
    }

    pub fn period_supplies(&self, organization_id: OrganizationId) -> Vec<Item> {
        self.in_group(organization_id, ProductGroup::PeriodSupplies)
    }

    fn filtered(
        &self,
        organization_id: OrganizationId,
        keep: impl Fn(&Item) -> bool,
    ) -> Vec<Item> {
        let mut items = self.items.list(organization_id);
        items.retain(|item| keep(item));
        items.sort_by(|a, b| a.name().cmp(b.name()));
        items
    }

    fn filtered_by_base(
        &self,
        organization_id: OrganizationId,
        keep: impl Fn(&goodbank_catalog::BaseItem) -> bool,
    ) -> Vec<Item> {
        self.filtered(organization_id, |item| {
            item.base_item_id()
                .and_then(|base_item_id| self.catalog.get(base_item_id))
                .is_some_and(|base| keep(&base))
        })
    }
}
