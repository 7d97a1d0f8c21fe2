//! Product group predicates and reporting-category derivation.
//!
//! The category strings below come from an externally curated taxonomy, so the
//! predicates match them exactly. No substring or prefix matching: upstream
//! data is not guaranteed to follow a stricter schema, and a loose match would
//! silently widen the groups downstream reporting depends on.

use serde::{Deserialize, Serialize};

use crate::base_item::BaseItem;

/// Category string for children's disposable diapers.
pub const CATEGORY_DISPOSABLE_KIDS: &str = "Diapers - Childrens";

/// Category string for children's cloth diapers.
pub const CATEGORY_CLOTH_KIDS: &str = "Diapers - Cloth (Kids)";

/// Categories counted as adult incontinence supplies. Membership is decided by
/// the category alone; the partner key never gates it.
pub const CATEGORIES_ADULT_INCONTINENCE: [&str; 3] = [
    "Diapers - Cloth (Adult)",
    "Diapers - Adult",
    "Incontinence Pads - Adult",
];

/// Category string for period supplies.
pub const CATEGORY_PERIOD_SUPPLIES: &str = "Menstrual Supplies/Items";

/// Partner key marking a catch-all product.
pub const PARTNER_KEY_OTHER: &str = "other";

/// Semantic product grouping used by reporting and distribution eligibility.
///
/// Groups are independently evaluable; the exact-match rules happen to make
/// them disjoint, but nothing here relies on that.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductGroup {
    Disposable,
    ClothDiapers,
    AdultIncontinence,
    PeriodSupplies,
}

impl ProductGroup {
    /// Whether a catalog category string belongs to this group.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            ProductGroup::Disposable => category == CATEGORY_DISPOSABLE_KIDS,
            ProductGroup::ClothDiapers => category == CATEGORY_CLOTH_KIDS,
            ProductGroup::AdultIncontinence => {
                CATEGORIES_ADULT_INCONTINENCE.contains(&category)
            }
            ProductGroup::PeriodSupplies => category == CATEGORY_PERIOD_SUPPLIES,
        }
    }

    pub const ALL: [ProductGroup; 4] = [
        ProductGroup::Disposable,
        ProductGroup::ClothDiapers,
        ProductGroup::AdultIncontinence,
        ProductGroup::PeriodSupplies,
    ];
}

/// Full classification result for a base item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub disposable: bool,
    pub cloth_diapers: bool,
    pub adult_incontinence: bool,
    pub period_supplies: bool,
    pub is_other: bool,
    /// Lower-cased partner key, used verbatim as the reporting label.
    pub reporting_category: String,
}

impl Classification {
    pub fn contains(&self, group: ProductGroup) -> bool {
        match group {
            ProductGroup::Disposable => self.disposable,
            ProductGroup::ClothDiapers => self.cloth_diapers,
            ProductGroup::AdultIncontinence => self.adult_incontinence,
            ProductGroup::PeriodSupplies => self.period_supplies,
        }
    }
}

/// Classify a base item. Pure and deterministic.
pub fn classify(base: &BaseItem) -> Classification {
    Classification {
        disposable: ProductGroup::Disposable.matches(&base.category),
        cloth_diapers: ProductGroup::ClothDiapers.matches(&base.category),
        adult_incontinence: ProductGroup::AdultIncontinence.matches(&base.category),
        period_supplies: ProductGroup::PeriodSupplies.matches(&base.category),
        is_other: is_other(&base.partner_key),
        reporting_category: reporting_category(&base.partner_key),
    }
}

/// Reporting-category label for a partner key: the key itself, lower-cased.
///
/// Computed once at item creation; items that back a kit get no reporting
/// category at all (callers decide that, since it depends on the item, not on
/// the base item).
pub fn reporting_category(partner_key: &str) -> String {
    partner_key.to_lowercase()
}

/// Whether the partner key marks the catch-all "other" product.
pub fn is_other(partner_key: &str) -> bool {
    partner_key == PARTNER_KEY_OTHER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_item::BaseItemId;
    use goodbank_core::AggregateId;

    fn base(category: &str, partner_key: &str) -> BaseItem {
        BaseItem {
            id: BaseItemId::new(AggregateId::new()),
            name: "Test Base".to_string(),
            category: category.to_string(),
            partner_key: partner_key.to_string(),
            size: "4".to_string(),
        }
    }

    #[test]
    fn childrens_disposables_classify_as_disposable_only() {
        let c = classify(&base("Diapers - Childrens", "diapers"));
        assert!(c.disposable);
        assert!(!c.cloth_diapers);
        assert!(!c.adult_incontinence);
        assert!(!c.period_supplies);
    }

    #[test]
    fn kids_cloth_classify_as_cloth_diapers_only() {
        let c = classify(&base("Diapers - Cloth (Kids)", "cloth_diapers"));
        assert!(c.cloth_diapers);
        assert!(!c.disposable);
        assert!(!c.adult_incontinence);
        assert!(!c.period_supplies);
    }

    #[test]
    fn adult_categories_classify_as_adult_incontinence() {
        for category in CATEGORIES_ADULT_INCONTINENCE {
            let c = classify(&base(category, "adult_incontinence"));
            assert!(c.adult_incontinence, "category {category:?} should match");
            assert!(!c.disposable);
            assert!(!c.cloth_diapers);
            assert!(!c.period_supplies);
        }
    }

    #[test]
    fn adult_incontinence_ignores_partner_key() {
        // Liners filed under the adult pad category count as adult
        // incontinence; liners filed under menstrual supplies do not.
        let ai_liners = classify(&base("Incontinence Pads - Adult", "ai_liners"));
        assert!(ai_liners.adult_incontinence);
        assert!(!ai_liners.period_supplies);

        let underpads = classify(&base("Incontinence Pads - Adult", "underpads"));
        assert!(underpads.adult_incontinence);

        let liners = classify(&base("Menstrual Supplies/Items", "liners"));
        assert!(!liners.adult_incontinence);
        assert!(liners.period_supplies);
    }

    #[test]
    fn period_supplies_ignores_partner_key() {
        for key in ["liners", "pads", "tampons"] {
            let c = classify(&base("Menstrual Supplies/Items", key));
            assert!(c.period_supplies, "partner key {key:?} should not gate");
            assert!(!c.adult_incontinence);
        }
    }

    #[test]
    fn adult_wipes_match_no_group() {
        let c = classify(&base("Wipes - Adults", "adult_wipes"));
        assert!(!c.disposable);
        assert!(!c.cloth_diapers);
        assert!(!c.adult_incontinence);
        assert!(!c.period_supplies);
    }

    #[test]
    fn reporting_category_is_lowercased_partner_key() {
        assert_eq!(reporting_category("Tampons"), "tampons");
        assert_eq!(reporting_category("adult_incontinence"), "adult_incontinence");
        let c = classify(&base("Menstrual Supplies/Items", "Tampons"));
        assert_eq!(c.reporting_category, "tampons");
    }

    #[test]
    fn other_partner_key_detection() {
        assert!(is_other("other"));
        assert!(!is_other("tampons"));
        // Exact match, no case folding: the key is curated data.
        assert!(!is_other("Other"));
        assert!(classify(&base("Wipes - Adults", "other")).is_other);
    }

    #[test]
    fn no_substring_or_prefix_matching() {
        for category in [
            "Diapers - Childrens (Pull-Ups)",
            "diapers - childrens",
            "Diapers",
            "Incontinence Pads",
        ] {
            for group in ProductGroup::ALL {
                assert!(!group.matches(category), "{group:?} matched {category:?}");
            }
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: classification is a pure function of category and
            /// partner key (same inputs, same result).
            #[test]
            fn classify_is_deterministic(
                category in "[A-Za-z/ ()-]{0,40}",
                partner_key in "[a-z_]{0,20}"
            ) {
                let b = base(&category, &partner_key);
                prop_assert_eq!(classify(&b), classify(&b));
            }

            /// Property: categories outside the rule table never gain group
            /// membership, regardless of partner key.
            #[test]
            fn unknown_categories_match_nothing(
                category in "[a-z]{1,30}",
                partner_key in "[a-z_]{0,20}"
            ) {
                let c = classify(&base(&category, &partner_key));
                prop_assert!(!c.disposable);
                prop_assert!(!c.cloth_diapers);
                prop_assert!(!c.adult_incontinence);
                prop_assert!(!c.period_supplies);
            }

            /// Property: the reporting label is always the lower-cased key.
            #[test]
            fn reporting_label_is_lowercase(partner_key in "[A-Za-z_]{0,20}") {
                prop_assert_eq!(
                    reporting_category(&partner_key),
                    partner_key.to_lowercase()
                );
            }
        }
    }
}
