#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use collectify::error::ServiceError;
use collectify::model::{Category, Field, FieldType, Item, ItemFieldValue};
use collectify::repository::{self, Filter, Scope};
use collectify::service::{category, field, item};
use common::{seed_category, seed_field, seed_item, test_context};
use serde_json::json;

async fn count<T: repository::Entity>(
    ctx: &collectify::AppContext,
    scope: Scope,
    filters: &[Filter],
) -> usize {
    let mut conn = ctx.pool.acquire().await.unwrap();
    repository::pluck_ids::<T>(&mut conn, scope, filters)
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn test_category_delete_cascades_and_restore_brings_everything_back() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let author = seed_field(&ctx, books.id, "author", FieldType::String, false).await;
    let pages = seed_field(&ctx, books.id, "pages", FieldType::Int, false).await;
    for title in ["Dune", "Emma", "Ubik"] {
        seed_item(
            &ctx,
            books.id,
            title,
            &[(author.id, json!("someone")), (pages.id, json!(300))],
        )
        .await;
    }
    assert_eq!(count::<ItemFieldValue>(&ctx, Scope::Active, &[]).await, 6);

    category::delete(&ctx, books.id).await.unwrap();

    assert_eq!(count::<Category>(&ctx, Scope::Active, &[]).await, 0);
    assert_eq!(count::<Field>(&ctx, Scope::Active, &[]).await, 0);
    assert_eq!(count::<Item>(&ctx, Scope::Active, &[]).await, 0);
    assert_eq!(count::<ItemFieldValue>(&ctx, Scope::Active, &[]).await, 0);
    // Soft delete keeps the rows.
    assert_eq!(count::<Item>(&ctx, Scope::Unscoped, &[]).await, 3);
    assert_eq!(count::<ItemFieldValue>(&ctx, Scope::Unscoped, &[]).await, 6);

    category::restore(&ctx, books.id).await.unwrap();

    let restored = category::get(&ctx, books.id).await.unwrap();
    assert_eq!(restored.fields.len(), 2);
    assert_eq!(count::<Item>(&ctx, Scope::Active, &[]).await, 3);
    assert_eq!(count::<ItemFieldValue>(&ctx, Scope::Active, &[]).await, 6);
}

#[tokio::test]
async fn test_restore_of_active_category_is_a_noop() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let author = seed_field(&ctx, books.id, "author", FieldType::String, false).await;
    field::delete(&ctx, author.id).await.unwrap();

    // The category itself is active, so its tombstoned field stays deleted.
    category::restore(&ctx, books.id).await.unwrap();
    assert!(category::get(&ctx, books.id).await.unwrap().fields.is_empty());
}

#[tokio::test]
async fn test_field_delete_and_restore_with_values() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let genres = seed_field(&ctx, books.id, "genres", FieldType::String, true).await;
    let dune = seed_item(&ctx, books.id, "Dune", &[(genres.id, json!(["sf", "classic"]))]).await;

    field::delete(&ctx, genres.id).await.unwrap();
    let after = item::get(&ctx, dune.item.id).await.unwrap();
    assert!(after.values.is_empty());

    field::restore(&ctx, genres.id).await.unwrap();
    let after = item::get(&ctx, dune.item.id).await.unwrap();
    assert_eq!(after.values.len(), 1);
    assert_eq!(after.values[0].value, json!(["sf", "classic"]));
}

#[tokio::test]
async fn test_field_restore_revives_category_but_not_sibling_fields() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let author = seed_field(&ctx, books.id, "author", FieldType::String, false).await;
    let pages = seed_field(&ctx, books.id, "pages", FieldType::Int, false).await;
    category::delete(&ctx, books.id).await.unwrap();

    field::restore(&ctx, author.id).await.unwrap();

    let detail = category::get(&ctx, books.id).await.unwrap();
    let ids: Vec<i64> = detail.fields.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![author.id]);
    assert!(!ids.contains(&pages.id));
}

#[tokio::test]
async fn test_item_restore_revives_category_with_all_fields() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let author = seed_field(&ctx, books.id, "author", FieldType::String, false).await;
    seed_field(&ctx, books.id, "pages", FieldType::Int, false).await;
    let dune = seed_item(&ctx, books.id, "Dune", &[(author.id, json!("Herbert"))]).await;
    category::delete(&ctx, books.id).await.unwrap();

    item::restore(&ctx, dune.item.id).await.unwrap();

    let detail = category::get(&ctx, books.id).await.unwrap();
    assert_eq!(detail.fields.len(), 2);
    let restored = item::get(&ctx, dune.item.id).await.unwrap();
    assert_eq!(restored.values[0].value, json!("Herbert"));
}

#[tokio::test]
async fn test_hard_delete_when_recycle_bin_disabled() {
    let ctx = test_context(false).await;
    let books = seed_category(&ctx, "Books").await;
    let author = seed_field(&ctx, books.id, "author", FieldType::String, false).await;
    seed_item(&ctx, books.id, "Dune", &[(author.id, json!("Herbert"))]).await;

    category::delete(&ctx, books.id).await.unwrap();

    assert_eq!(count::<Category>(&ctx, Scope::Unscoped, &[]).await, 0);
    assert_eq!(count::<Field>(&ctx, Scope::Unscoped, &[]).await, 0);
    assert_eq!(count::<Item>(&ctx, Scope::Unscoped, &[]).await, 0);
    assert_eq!(count::<ItemFieldValue>(&ctx, Scope::Unscoped, &[]).await, 0);

    let err = category::restore(&ctx, books.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn test_duplicate_name_reports_tombstoned_row() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    category::delete(&ctx, books.id).await.unwrap();

    let err = category::create(&ctx, "Books").await.unwrap_err();
    match err {
        ServiceError::Duplicated { id, is_deleted, .. } => {
            assert_eq!(id, books.id);
            assert!(is_deleted);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_rename_rejects_other_names_but_allows_own() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    seed_category(&ctx, "Films").await;

    let err = category::rename(&ctx, books.id, "Films").await.unwrap_err();
    assert!(matches!(err, ServiceError::Duplicated { is_deleted: false, .. }));

    let renamed = category::rename(&ctx, books.id, " Books ").await.unwrap();
    assert_eq!(renamed.name, "Books");
}

#[tokio::test]
async fn test_deleting_missing_item_is_not_found() {
    let ctx = test_context(true).await;
    let err = item::delete(&ctx, 404).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "item" }));
    // Nothing left behind that a filter could match.
    assert_eq!(
        count::<Item>(&ctx, Scope::Unscoped, &[Filter::eq("id", 404_i64)]).await,
        0
    );
}
