use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::catalog::filter::{self, FilterSortRequest};
use crate::catalog::references::{self, ReferenceData};
use crate::catalog::repository::{self, CatalogItem};
use crate::error::CatalogError;

/// Per-window catalog state: the authoritative snapshot of the fetched
/// catalog plus the active filter/sort request. Each window owns its own
/// session and its own view; nothing is shared between windows.
pub struct CatalogViewSession {
    db: Arc<DatabaseConnection>,
    references: ReferenceData,
    all_items: Vec<CatalogItem>,
    request: FilterSortRequest,
    view: Vec<CatalogItem>,
}

impl CatalogViewSession {
    /// Loads the reference lookups and the full catalog. Called once when a
    /// window opens.
    pub async fn open(db: Arc<DatabaseConnection>) -> Result<Self, CatalogError> {
        let references = references::load_references(&db).await?;
        let all_items = repository::fetch_all(&db).await?;
        let request = FilterSortRequest::default();
        let view = filter::apply(&all_items, &request);

        Ok(Self {
            db,
            references,
            all_items,
            request,
            view,
        })
    }

    /// Re-fetches the full catalog and re-applies the current request.
    /// Item identity is not preserved across refreshes.
    pub async fn refresh(&mut self) -> Result<(), CatalogError> {
        self.all_items = repository::fetch_all(&self.db).await?;
        self.view = filter::apply(&self.all_items, &self.request);
        Ok(())
    }

    pub fn set_filter(&mut self, request: FilterSortRequest) {
        self.request = request;
        self.view = filter::apply(&self.all_items, &self.request);
    }

    /// Back to no search text, no vendor constraint, no sort.
    pub fn reset(&mut self) {
        self.set_filter(FilterSortRequest::default());
    }

    /// The ordered view the presentation renders. The unfiltered snapshot is
    /// never handed out.
    pub fn current_view(&self) -> &[CatalogItem] {
        &self.view
    }

    pub fn request(&self) -> &FilterSortRequest {
        &self.request
    }

    pub fn references(&self) -> &ReferenceData {
        &self.references
    }

    /// Distinct vendor names present in the snapshot, sorted, for the vendor
    /// selector. Derived from the fetched products rather than the vendors
    /// table so the list only offers values that can actually match.
    pub fn vendor_options(&self) -> Vec<String> {
        let mut vendors: Vec<String> = self
            .all_items
            .iter()
            .map(|item| item.vendor_name.clone())
            .collect();
        vendors.sort();
        vendors.dedup();
        vendors
    }
}
