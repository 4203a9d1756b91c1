use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::assets::{ImageAssetManager, StagedAsset};
use crate::catalog::repository::{self, CatalogItem};
use crate::error::CatalogError;

/// User-entered product fields, as collected by an edit form. Ids and
/// article codes are allocated by the workflow, never supplied here.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, message = "product name must not be empty"))]
    pub name: String,
    pub category_id: i32,
    pub manufacturer_id: i32,
    pub vendor_id: i32,
    pub description: Option<String>,
    pub size: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f32,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0, max = 100, message = "discount must be between 0 and 100"))]
    pub discount: i32,
}

/// The display article code derived from an allocated id.
pub fn article_for(id: i32) -> String {
    format!("ART{id:04}")
}

fn normalize(mut draft: ProductDraft) -> ProductDraft {
    draft.name = draft.name.trim().to_owned();
    draft.description = draft
        .description
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());
    draft.size = draft
        .size
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());
    draft
}

fn validate(draft: &ProductDraft) -> Result<(), CatalogError> {
    draft
        .validate()
        .map_err(|err| CatalogError::Validation(err.to_string()))
}

/// Orchestrates a single create/update/delete against the row store and the
/// asset store. The row write decides success or failure; asset work after a
/// committed row is best-effort and can only cost an image, never the save.
pub struct ProductWriteWorkflow {
    db: Arc<DatabaseConnection>,
    assets: ImageAssetManager,
}

impl ProductWriteWorkflow {
    pub fn new(db: Arc<DatabaseConnection>, assets: ImageAssetManager) -> Self {
        Self { db, assets }
    }

    pub fn assets(&self) -> &ImageAssetManager {
        &self.assets
    }

    /// Validates the draft, allocates the next id and its article code, and
    /// inserts the row, all in one transaction. A staged image is committed
    /// afterwards under the id-derived name, with a follow-up write of the
    /// image column.
    pub async fn create(
        &self,
        draft: ProductDraft,
        staged: Option<StagedAsset>,
    ) -> Result<CatalogItem, CatalogError> {
        let draft = normalize(draft);
        validate(&draft)?;

        let txn = self.db.begin().await?;
        let id = repository::next_id(&txn).await?;
        let article = article_for(id);
        repository::insert(&txn, id, &article, &draft, None).await?;
        txn.commit().await?;

        info!(id, %article, "product created");

        if let Some(staged) = staged {
            match self.assets.commit(&staged, id) {
                Ok(name) => {
                    if let Err(err) = repository::set_image(&*self.db, id, Some(name)).await {
                        warn!(id, %err, "image committed but the row still points at nothing");
                    }
                }
                Err(err) => warn!(id, %err, "image commit failed, product saved without one"),
            }
        }

        repository::fetch_one(&self.db, id).await
    }

    /// Full-row update. A staged image is committed under the existing id's
    /// derived name before the row write so the row records the name that is
    /// actually on disk; the previous file is dropped only after the row
    /// commit succeeds.
    pub async fn update(
        &self,
        id: i32,
        draft: ProductDraft,
        staged: Option<StagedAsset>,
    ) -> Result<CatalogItem, CatalogError> {
        let draft = normalize(draft);
        validate(&draft)?;

        let txn = self.db.begin().await?;
        let old_image = repository::find_row(&txn, id).await?.image;

        let mut committed = None;
        let image = match &staged {
            Some(staged) => match self.assets.commit(staged, id) {
                Ok(name) => {
                    committed = Some(name.clone());
                    Some(name)
                }
                Err(err) => {
                    warn!(id, %err, "image commit failed, keeping the previous image");
                    old_image.clone()
                }
            },
            None => old_image.clone(),
        };

        repository::update(&txn, id, &draft, image).await?;
        txn.commit().await?;

        info!(id, "product updated");

        if let Some(new_name) = committed {
            self.assets.replace(old_image.as_deref(), &new_name);
        }

        repository::fetch_one(&self.db, id).await
    }

    /// Refuses to remove a product an order line still references; otherwise
    /// deletes the row and best-effort removes its asset file.
    pub async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let txn = self.db.begin().await?;

        let references = repository::count_order_references(&txn, id).await?;
        if references > 0 {
            return Err(CatalogError::Blocked(id));
        }

        let image = repository::find_row(&txn, id).await?.image;
        repository::delete(&txn, id).await?;
        txn.commit().await?;

        info!(id, "product deleted");

        if let Some(image) = image {
            self.assets.remove(&image);
        }

        Ok(())
    }
}
