mod common;

use sea_orm::{ConnectionTrait, EntityTrait};

use rust_bashmaki::catalog::repository;
use rust_bashmaki::catalog::workflow::article_for;
use rust_bashmaki::entities::category;
use rust_bashmaki::error::CatalogError;

#[tokio::test]
async fn next_id_on_empty_catalog_is_one() {
    let db = common::test_db().await;

    let id = repository::next_id(&*db).await.expect("next_id");

    assert_eq!(id, 1);
}

#[tokio::test]
async fn next_id_is_max_plus_one_not_gap_filling() {
    let db = common::test_db().await;
    let refs = common::seed_references(&db).await;

    for id in [3, 7, 9] {
        let draft = common::draft(&format!("Shoe {id}"), &refs);
        repository::insert(&*db, id, &article_for(id), &draft, None)
            .await
            .expect("insert");
    }

    let id = repository::next_id(&*db).await.expect("next_id");

    assert_eq!(id, 10);
}

#[tokio::test]
async fn insert_with_taken_id_is_duplicate_key() {
    let db = common::test_db().await;
    let refs = common::seed_references(&db).await;

    let draft = common::draft("Sneaker A", &refs);
    repository::insert(&*db, 1, &article_for(1), &draft, None)
        .await
        .expect("first insert");

    let err = repository::insert(&*db, 1, "ART9999", &draft, None)
        .await
        .expect_err("second insert with the same id must fail");

    assert!(matches!(err, CatalogError::DuplicateKey(1)), "got {err:?}");
}

#[tokio::test]
async fn insert_with_unknown_vendor_is_constraint_violation() {
    let db = common::test_db().await;
    let refs = common::seed_references(&db).await;

    let mut draft = common::draft("Sneaker A", &refs);
    draft.vendor_id = 999;

    let err = repository::insert(&*db, 1, &article_for(1), &draft, None)
        .await
        .expect_err("dangling vendor must be rejected");

    assert!(
        matches!(
            err,
            CatalogError::ConstraintViolation {
                entity: "vendor",
                id: 999
            }
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn fetch_one_returns_joined_names() {
    let db = common::test_db().await;
    let refs = common::seed_references(&db).await;

    let draft = common::draft("Sneaker A", &refs);
    repository::insert(&*db, 1, &article_for(1), &draft, None)
        .await
        .expect("insert");

    let item = repository::fetch_one(&db, 1).await.expect("fetch_one");

    assert_eq!(item.name, "Sneaker A");
    assert_eq!(item.article, "ART0001");
    assert_eq!(item.category_name, "Sneakers");
    assert_eq!(item.manufacturer_name, "Bashmaki");
    assert_eq!(item.vendor_name, "StepSupply");
}

#[tokio::test]
async fn fetch_one_missing_is_not_found() {
    let db = common::test_db().await;

    let err = repository::fetch_one(&db, 42)
        .await
        .expect_err("missing product");

    assert!(matches!(err, CatalogError::NotFound(42)), "got {err:?}");
}

#[tokio::test]
async fn fetch_all_excludes_rows_with_dangling_references() {
    let db = common::test_db().await;
    let refs = common::seed_references(&db).await;

    let draft = common::draft("Sneaker A", &refs);
    repository::insert(&*db, 1, &article_for(1), &draft, None)
        .await
        .expect("insert");

    // Orphan the row the way a store without enforcement would allow.
    db.execute_unprepared("PRAGMA foreign_keys = OFF")
        .await
        .expect("pragma");
    category::Entity::delete_by_id(refs.category)
        .exec(&*db)
        .await
        .expect("delete category");

    let items = repository::fetch_all(&db).await.expect("fetch_all");
    assert!(
        items.is_empty(),
        "a product whose category no longer resolves must be dropped by the join"
    );

    let err = repository::fetch_one(&db, 1)
        .await
        .expect_err("the orphaned row is invisible to the joined lookup too");
    assert!(matches!(err, CatalogError::NotFound(1)), "got {err:?}");
}

#[tokio::test]
async fn count_order_references_counts_lines_for_the_product() {
    let db = common::test_db().await;
    let refs = common::seed_references(&db).await;

    for id in [1, 2] {
        let draft = common::draft(&format!("Shoe {id}"), &refs);
        repository::insert(&*db, id, &article_for(id), &draft, None)
            .await
            .expect("insert");
    }
    common::seed_order_referencing(&db, 1).await;

    let referenced = repository::count_order_references(&*db, 1)
        .await
        .expect("count");
    let free = repository::count_order_references(&*db, 2)
        .await
        .expect("count");

    assert_eq!(referenced, 1);
    assert_eq!(free, 0);
}
