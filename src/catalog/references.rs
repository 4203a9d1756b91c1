use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{category, manufacturer, vendor};
use crate::error::CatalogError;

/// Lookup sets a session loads once at open and treats as immutable until
/// the window closes. The core never writes these tables.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub categories: Vec<category::Model>,
    pub manufacturers: Vec<manufacturer::Model>,
    pub vendors: Vec<vendor::Model>,
}

pub async fn load_references(db: &DatabaseConnection) -> Result<ReferenceData, CatalogError> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;

    let manufacturers = manufacturer::Entity::find()
        .order_by_asc(manufacturer::Column::Name)
        .all(db)
        .await?;

    let vendors = vendor::Entity::find()
        .order_by_asc(vendor::Column::Name)
        .all(db)
        .await?;

    Ok(ReferenceData {
        categories,
        manufacturers,
        vendors,
    })
}
