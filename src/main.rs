use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use rust_bashmaki::assets::ImageAssetManager;
use rust_bashmaki::catalog::session::CatalogViewSession;
use rust_bashmaki::catalog::workflow::ProductWriteWorkflow;
use rust_bashmaki::entities::{primary_setup, setup_schema};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to the store");
    setup_schema(&db).await.expect("Failed to create schema");

    let shared_db = Arc::new(db);

    primary_setup(shared_db.clone())
        .await
        .expect("Failed to seed first-run data");

    // The core the presentation embeds: one session per window, one write
    // workflow for the roles that may edit.
    let _workflow = ProductWriteWorkflow::new(shared_db.clone(), ImageAssetManager::from_env());
    let session = CatalogViewSession::open(shared_db.clone())
        .await
        .expect("Failed to open catalog session");

    tracing::info!(
        products = session.current_view().len(),
        vendors = session.vendor_options().len(),
        "catalog ready"
    );
}
