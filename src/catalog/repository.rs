use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QuerySelect, RelationTrait, Set,
    SqlErr,
};
use serde::Serialize;

use crate::catalog::workflow::ProductDraft;
use crate::entities::{category, manufacturer, order_item, product, vendor};
use crate::error::CatalogError;

/// One catalog row as the presentation consumes it: every product column
/// plus the joined display names.
#[derive(Clone, Debug, PartialEq, Serialize, FromQueryResult)]
pub struct CatalogItem {
    pub id: i32,
    pub article: String,
    pub name: String,
    pub category_id: i32,
    pub manufacturer_id: i32,
    pub vendor_id: i32,
    pub description: Option<String>,
    pub size: Option<String>,
    pub price: f32,
    pub quantity: Option<i32>,
    pub discount: Option<i32>,
    pub image: Option<String>,
    pub category_name: String,
    pub manufacturer_name: String,
    pub vendor_name: String,
}

/// How a catalog row should be tinted in a product list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    None,
    OutOfStock,
    BigDiscount,
}

impl CatalogItem {
    pub fn quantity_on_hand(&self) -> i32 {
        self.quantity.unwrap_or(0)
    }

    pub fn discount_percent(&self) -> i32 {
        self.discount.unwrap_or(0)
    }

    /// Price after the discount percentage is applied.
    pub fn final_price(&self) -> f32 {
        self.price - self.price * self.discount_percent() as f32 / 100.0
    }

    pub fn highlight(&self) -> Highlight {
        if self.quantity_on_hand() == 0 {
            Highlight::OutOfStock
        } else if self.discount_percent() > 15 {
            Highlight::BigDiscount
        } else {
            Highlight::None
        }
    }
}

fn joined_query() -> sea_orm::Select<product::Entity> {
    product::Entity::find()
        .join(JoinType::InnerJoin, product::Relation::Category.def())
        .join(JoinType::InnerJoin, product::Relation::Manufacturer.def())
        .join(JoinType::InnerJoin, product::Relation::Vendor.def())
        .column_as(category::Column::Name, "category_name")
        .column_as(manufacturer::Column::Name, "manufacturer_name")
        .column_as(vendor::Column::Name, "vendor_name")
}

/// Fetches the whole catalog in the store's own order. A product whose
/// category, manufacturer or vendor id does not resolve is excluded by the
/// inner join rather than surfaced as an error.
pub async fn fetch_all(db: &DatabaseConnection) -> Result<Vec<CatalogItem>, CatalogError> {
    let items = joined_query()
        .into_model::<CatalogItem>()
        .all(db)
        .await?;

    Ok(items)
}

pub async fn fetch_one(db: &DatabaseConnection, id: i32) -> Result<CatalogItem, CatalogError> {
    joined_query()
        .filter(product::Column::Id.eq(id))
        .into_model::<CatalogItem>()
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound(id))
}

pub(crate) async fn find_row<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<product::Model, CatalogError> {
    product::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(CatalogError::NotFound(id))
}

/// `max(id) + 1`, or 1 on an empty catalog. Not gap-filling; two writers
/// racing through here can allocate the same id and the later insert fails
/// with `DuplicateKey`. Callers run this inside the same transaction as the
/// insert to keep that window narrow.
pub async fn next_id<C: ConnectionTrait>(conn: &C) -> Result<i32, CatalogError> {
    let max_id = product::Entity::find()
        .select_only()
        .column_as(product::Column::Id.max(), "max_id")
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?
        .flatten();

    Ok(max_id.unwrap_or(0) + 1)
}

/// The store itself may not enforce references, so the write path does.
pub async fn ensure_references<C: ConnectionTrait>(
    conn: &C,
    draft: &ProductDraft,
) -> Result<(), CatalogError> {
    if category::Entity::find_by_id(draft.category_id)
        .one(conn)
        .await?
        .is_none()
    {
        return Err(CatalogError::ConstraintViolation {
            entity: "category",
            id: draft.category_id,
        });
    }

    if manufacturer::Entity::find_by_id(draft.manufacturer_id)
        .one(conn)
        .await?
        .is_none()
    {
        return Err(CatalogError::ConstraintViolation {
            entity: "manufacturer",
            id: draft.manufacturer_id,
        });
    }

    if vendor::Entity::find_by_id(draft.vendor_id)
        .one(conn)
        .await?
        .is_none()
    {
        return Err(CatalogError::ConstraintViolation {
            entity: "vendor",
            id: draft.vendor_id,
        });
    }

    Ok(())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    article: &str,
    draft: &ProductDraft,
    image: Option<String>,
) -> Result<(), CatalogError> {
    ensure_references(conn, draft).await?;

    let row = product::ActiveModel {
        id: Set(id),
        article: Set(article.to_owned()),
        name: Set(draft.name.clone()),
        category_id: Set(draft.category_id),
        manufacturer_id: Set(draft.manufacturer_id),
        vendor_id: Set(draft.vendor_id),
        description: Set(draft.description.clone()),
        size: Set(draft.size.clone()),
        price: Set(draft.price),
        quantity: Set(Some(draft.quantity)),
        discount: Set(Some(draft.discount)),
        image: Set(image),
    };

    product::Entity::insert(row)
        .exec(conn)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => CatalogError::DuplicateKey(id),
            _ => err.into(),
        })?;

    Ok(())
}

/// Full-row update of every mutable field. The id and article never change
/// once allocated.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    draft: &ProductDraft,
    image: Option<String>,
) -> Result<(), CatalogError> {
    let existing = find_row(conn, id).await?;
    ensure_references(conn, draft).await?;

    let mut row: product::ActiveModel = existing.into();
    row.name = Set(draft.name.clone());
    row.category_id = Set(draft.category_id);
    row.manufacturer_id = Set(draft.manufacturer_id);
    row.vendor_id = Set(draft.vendor_id);
    row.description = Set(draft.description.clone());
    row.size = Set(draft.size.clone());
    row.price = Set(draft.price);
    row.quantity = Set(Some(draft.quantity));
    row.discount = Set(Some(draft.discount));
    row.image = Set(image);

    row.update(conn).await?;

    Ok(())
}

/// Follow-up write of just the image column, used after an asset commit
/// that happens once the row already exists.
pub async fn set_image<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    image: Option<String>,
) -> Result<(), CatalogError> {
    let existing = find_row(conn, id).await?;

    let mut row: product::ActiveModel = existing.into();
    row.image = Set(image);
    row.update(conn).await?;

    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), CatalogError> {
    let existing = find_row(conn, id).await?;

    let row: product::ActiveModel = existing.into();
    row.delete(conn).await?;

    Ok(())
}

/// How many order lines still reference this product. Deletion is refused
/// while this is non-zero.
pub async fn count_order_references<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
) -> Result<u64, CatalogError> {
    let count = order_item::Entity::find()
        .filter(order_item::Column::ProductId.eq(product_id))
        .count(conn)
        .await?;

    Ok(count)
}
