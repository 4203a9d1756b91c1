use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::entities::category::Entity as Category;
use crate::entities::manufacturer::Entity as Manufacturer;
use crate::entities::vendor::Entity as Vendor;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    // Ids are allocated by the write path, not by the store.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub article: String,
    pub name: String,
    pub category_id: i32,
    pub manufacturer_id: i32,
    pub vendor_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub size: Option<String>,
    pub price: f32,
    pub quantity: Option<i32>,
    pub discount: Option<i32>,
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Category",
        from = "Column::CategoryId",
        to = "crate::entities::category::Column::Id",
    )]
    Category,
    #[sea_orm(
        belongs_to = "Manufacturer",
        from = "Column::ManufacturerId",
        to = "crate::entities::manufacturer::Column::Id",
    )]
    Manufacturer,
    #[sea_orm(
        belongs_to = "Vendor",
        from = "Column::VendorId",
        to = "crate::entities::vendor::Column::Id",
    )]
    Vendor,
}

impl ActiveModelBehavior for ActiveModel {}
