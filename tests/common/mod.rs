#![allow(dead_code)]

use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::path::Path;
use std::sync::Arc;

use rust_bashmaki::catalog::workflow::ProductDraft;
use rust_bashmaki::entities::{
    category, manufacturer, order, order_item, setup_schema, user, vendor,
};

/// One pooled connection, so every query in a test sees the same in-memory
/// database.
pub async fn test_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory store");
    setup_schema(&db).await.expect("Failed to create schema");

    Arc::new(db)
}

pub struct ReferenceIds {
    pub category: i32,
    pub manufacturer: i32,
    pub vendor: i32,
}

pub async fn seed_references(db: &DatabaseConnection) -> ReferenceIds {
    let category = category::ActiveModel {
        name: Set("Sneakers".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed category");

    let manufacturer = manufacturer::ActiveModel {
        name: Set("Bashmaki".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed manufacturer");

    let vendor = vendor::ActiveModel {
        name: Set("StepSupply".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed vendor");

    ReferenceIds {
        category: category.id,
        manufacturer: manufacturer.id,
        vendor: vendor.id,
    }
}

pub async fn seed_vendor(db: &DatabaseConnection, name: &str) -> i32 {
    vendor::ActiveModel {
        name: Set(name.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed vendor")
    .id
}

pub fn draft(name: &str, refs: &ReferenceIds) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        category_id: refs.category,
        manufacturer_id: refs.manufacturer,
        vendor_id: refs.vendor,
        description: Some("Everyday shoe".to_owned()),
        size: Some("42".to_owned()),
        price: 100.0,
        quantity: 5,
        discount: 0,
    }
}

/// Puts `product_id` on an order line so the delete guard has something to
/// refuse over.
pub async fn seed_order_referencing(db: &DatabaseConnection, product_id: i32) {
    let client = user::ActiveModel {
        login: Set(format!("client_for_{product_id}")),
        password: Set("unused".to_owned()),
        role: Set(user::Role::Client),
        last_name: Set("Petrov".to_owned()),
        first_name: Set("Petr".to_owned()),
        middle_name: Set("Petrovich".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed client");

    let order = order::ActiveModel {
        status: Set(order::Status::Created),
        user_id: Set(client.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed order");

    order_item::ActiveModel {
        quantity: Set(1),
        product_id: Set(product_id),
        order_id: Set(order.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed order item");
}

/// A small valid image the asset manager will accept.
pub fn write_sample_image(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height)
        .save(path)
        .expect("Failed to write sample image");
}
