pub mod category;
pub mod manufacturer;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;
pub mod vendor;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Schema, Set,
};
use std::sync::Arc;

use crate::entities::{
    category::Entity as Category, manufacturer::Entity as Manufacturer, order::Entity as Order,
    order_item::Entity as OrderItem, product::Entity as Product, user::Entity as User,
    vendor::Entity as Vendor,
};

pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Parents before children, in case the store enforces references.
    db.execute(backend.build(&schema.create_table_from_entity(Category)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Manufacturer)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Vendor)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(User)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Product)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Order)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(OrderItem)))
        .await?;

    Ok(())
}

/// Seeds the one account a fresh store needs to be reachable at all.
/// Safe to call on every start.
pub async fn primary_setup(db: Arc<DatabaseConnection>) -> Result<(), DbErr> {
    let existing = user::Entity::find()
        .filter(user::Column::Login.eq("admin"))
        .one(&*db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password("Secret15".as_bytes(), &salt)
        .map_err(|err| DbErr::Custom(format!("Failed to hash password: {err}")))?
        .to_string();

    let new_admin = user::ActiveModel {
        login: Set("admin".to_owned()),
        password: Set(password_hash),
        role: Set(user::Role::Administrator),
        last_name: Set("Admin".to_owned()),
        first_name: Set("Store".to_owned()),
        middle_name: Set(String::new()),
        ..Default::default()
    };

    user::Entity::insert(new_admin).exec(&*db).await?;

    Ok(())
}
