use std::cmp::Reverse;

use crate::catalog::repository::CatalogItem;

/// The (search text, vendor constraint, sort mode) triple governing one
/// catalog view. `vendor: None` means no constraint. Plain value; `Default`
/// is the reset state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSortRequest {
    pub search: String,
    pub vendor: Option<String>,
    pub sort: SortMode,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    None,
    QuantityAsc,
    QuantityDesc,
}

/// Every field the text search runs over. Matching any one of them keeps
/// the product.
fn matches(item: &CatalogItem, needle: &str) -> bool {
    let fields = [
        Some(item.name.as_str()),
        item.description.as_deref(),
        Some(item.manufacturer_name.as_str()),
        Some(item.vendor_name.as_str()),
        Some(item.category_name.as_str()),
        Some(item.article.as_str()),
        item.size.as_deref(),
    ];

    fields
        .iter()
        .any(|field| field.unwrap_or("").to_lowercase().contains(needle))
}

/// Narrows and orders a catalog snapshot. Pure: the input is never mutated,
/// and re-applying the same request to the output changes nothing.
///
/// Vendor constraint is an exact, case-sensitive name match; the text search
/// is a case-insensitive substring match across the seven display fields;
/// the quantity sorts are stable, so ties keep their fetch order in both
/// directions, and a missing quantity sorts as zero.
pub fn apply(items: &[CatalogItem], request: &FilterSortRequest) -> Vec<CatalogItem> {
    let mut result: Vec<CatalogItem> = items.to_vec();

    if let Some(vendor) = &request.vendor {
        result.retain(|item| item.vendor_name == *vendor);
    }

    let needle = request.search.trim().to_lowercase();
    if !needle.is_empty() {
        result.retain(|item| matches(item, &needle));
    }

    match request.sort {
        SortMode::None => {}
        SortMode::QuantityAsc => result.sort_by_key(|item| item.quantity_on_hand()),
        SortMode::QuantityDesc => result.sort_by_key(|item| Reverse(item.quantity_on_hand())),
    }

    result
}
