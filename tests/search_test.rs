#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use collectify::error::ServiceError;
use collectify::model::{Field, FieldType};
use collectify::repository;
use collectify::service::item::{self, SearchRequest};
use collectify::service::collection::{self, CollectionInput};
use collectify::service::{field, tag};
use common::{seed_category, seed_field, seed_item, test_context};
use serde_json::{json, Value};

fn request(value: Value) -> SearchRequest {
    serde_json::from_value(value).unwrap()
}

fn titles(list: &collectify::model::ListResponse<collectify::model::ItemDetail>) -> Vec<String> {
    let mut titles: Vec<String> = list.list.iter().map(|d| d.item.title.clone()).collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn test_pagination_counts_distinct_items() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let a = tag::create(&ctx, "a").await.unwrap();
    let b = tag::create(&ctx, "b").await.unwrap();
    let mut ids = Vec::new();
    for n in 1..=25 {
        let created = seed_item(&ctx, books.id, &format!("Book {n:02}"), &[]).await;
        // Two tags per item would double every row without the id phase.
        item::add_tag(&ctx, created.item.id, a.id).await.unwrap();
        item::add_tag(&ctx, created.item.id, b.id).await.unwrap();
        ids.push(created.item.id);
    }

    let page = item::search(
        &ctx,
        &request(json!({ "category_id": books.id, "page": 2, "page_size": 10 })),
    )
    .await
    .unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.list.len(), 10);
    let got: Vec<i64> = page.list.iter().map(|d| d.item.id).collect();
    let expected: Vec<i64> = ids.iter().rev().skip(10).take(10).copied().collect();
    assert_eq!(got, expected);

    let tagged = item::search(
        &ctx,
        &request(json!({ "category_id": books.id, "tag_ids": [a.id, b.id], "no_paging": true })),
    )
    .await
    .unwrap();
    assert_eq!(tagged.total, 25);
    assert_eq!(tagged.list.len(), 25);
}

#[tokio::test]
async fn test_field_filters_are_conjunctive() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let author = seed_field(&ctx, books.id, "author", FieldType::String, false).await;
    let pages = seed_field(&ctx, books.id, "pages", FieldType::Int, false).await;
    let owned = seed_field(&ctx, books.id, "owned", FieldType::Bool, false).await;
    seed_item(
        &ctx,
        books.id,
        "Dune",
        &[(author.id, json!("Frank Herbert")), (pages.id, json!(412)), (owned.id, json!(true))],
    )
    .await;
    seed_item(
        &ctx,
        books.id,
        "Children of Dune",
        &[(author.id, json!("Frank Herbert")), (pages.id, json!(444)), (owned.id, json!(false))],
    )
    .await;
    seed_item(
        &ctx,
        books.id,
        "Emma",
        &[(author.id, json!("Jane Austen")), (pages.id, json!(412))],
    )
    .await;

    let only_author = item::search(
        &ctx,
        &request(json!({ "category_id": books.id, "filters": { author.id.to_string(): "herbert" } })),
    )
    .await
    .unwrap();
    assert_eq!(titles(&only_author), vec!["Children of Dune", "Dune"]);

    let both = item::search(
        &ctx,
        &request(json!({
            "category_id": books.id,
            "filters": { author.id.to_string(): "Herbert", pages.id.to_string(): 412 }
        })),
    )
    .await
    .unwrap();
    assert_eq!(titles(&both), vec!["Dune"]);

    let owned_false = item::search(
        &ctx,
        &request(json!({
            "category_id": books.id,
            "name": "dune",
            "filters": { owned.id.to_string(): "false" }
        })),
    )
    .await
    .unwrap();
    assert_eq!(titles(&owned_false), vec!["Children of Dune"]);

    let none = item::search(
        &ctx,
        &request(json!({
            "category_id": books.id,
            "filters": { author.id.to_string(): "Austen", pages.id.to_string(): 444 }
        })),
    )
    .await
    .unwrap();
    assert_eq!(none.total, 0);
    assert!(none.list.is_empty());
}

#[tokio::test]
async fn test_collection_filter_ignores_deleted_collections() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let shelf = |name: &str| CollectionInput {
        name: name.to_string(),
        description: String::new(),
    };
    let favourites = collection::create(&ctx, &shelf("favourites")).await.unwrap();
    let to_read = collection::create(&ctx, &shelf("to read")).await.unwrap();

    let dune = seed_item(&ctx, books.id, "Dune", &[]).await;
    let emma = seed_item(&ctx, books.id, "Emma", &[]).await;
    let ulysses = seed_item(&ctx, books.id, "Ulysses", &[]).await;
    seed_item(&ctx, books.id, "Loose", &[]).await;
    item::add_to_collection(&ctx, dune.item.id, favourites.id).await.unwrap();
    item::add_to_collection(&ctx, dune.item.id, to_read.id).await.unwrap();
    item::add_to_collection(&ctx, emma.item.id, favourites.id).await.unwrap();
    item::add_to_collection(&ctx, ulysses.item.id, to_read.id).await.unwrap();

    let search_in = |ids: Vec<i64>| {
        request(json!({ "category_id": books.id, "collection_ids": ids, "no_paging": true }))
    };

    let both = item::search(&ctx, &search_in(vec![favourites.id, to_read.id]))
        .await
        .unwrap();
    assert_eq!(both.total, 3);
    assert_eq!(titles(&both), vec!["Dune", "Emma", "Ulysses"]);

    collection::delete(&ctx, to_read.id).await.unwrap();

    let after = item::search(&ctx, &search_in(vec![favourites.id, to_read.id]))
        .await
        .unwrap();
    assert_eq!(after.total, 2);
    assert_eq!(titles(&after), vec!["Dune", "Emma"]);

    let only_deleted = item::search(&ctx, &search_in(vec![to_read.id])).await.unwrap();
    assert_eq!(only_deleted.total, 0);
    assert!(only_deleted.list.is_empty());
}

#[tokio::test]
async fn test_array_and_datetime_range_filters() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let genres = seed_field(&ctx, books.id, "genres", FieldType::String, true).await;
    let read_at = seed_field(&ctx, books.id, "read_at", FieldType::Datetime, false).await;
    seed_item(
        &ctx,
        books.id,
        "Dune",
        &[(genres.id, json!(["science fiction", "classic"])), (read_at.id, json!("2023-03-01"))],
    )
    .await;
    seed_item(
        &ctx,
        books.id,
        "Emma",
        &[(genres.id, json!(["romance"])), (read_at.id, json!("2024-06-15"))],
    )
    .await;

    let any_genre = item::search(
        &ctx,
        &request(json!({
            "category_id": books.id,
            "filters": { genres.id.to_string(): ["fiction", "romance"] }
        })),
    )
    .await
    .unwrap();
    assert_eq!(any_genre.total, 2);

    let in_2024 = item::search(
        &ctx,
        &request(json!({
            "category_id": books.id,
            "filters": {
                read_at.id.to_string(): { "start": "2024-01-01T00:00:00Z", "end": "2024-12-31T23:59:59Z" }
            }
        })),
    )
    .await
    .unwrap();
    assert_eq!(titles(&in_2024), vec!["Emma"]);
}

#[tokio::test]
async fn test_search_rejects_unknown_and_deleted_fields() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    let author = seed_field(&ctx, books.id, "author", FieldType::String, false).await;
    field::delete(&ctx, author.id).await.unwrap();

    let err = item::search(
        &ctx,
        &request(json!({ "category_id": books.id, "filters": { author.id.to_string(): "x" } })),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::FieldNotFound(id) if id == author.id));

    let err = item::search(&ctx, &request(json!({ "category_id": 0 })))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParams(_)));
}

#[tokio::test]
async fn test_bool_array_query_is_reported() {
    let ctx = test_context(true).await;
    let books = seed_category(&ctx, "Books").await;
    // Bool arrays cannot be created through the service; insert one directly.
    let flags: Field = {
        let mut conn = ctx.pool.acquire().await.unwrap();
        repository::create::<Field>(
            &mut conn,
            &[
                ("category_id", books.id.into()),
                ("name", "flags".into()),
                ("type", FieldType::Bool.code().into()),
                ("is_array", true.into()),
                ("required", false.into()),
            ],
        )
        .await
        .unwrap()
    };

    let err = item::search(
        &ctx,
        &request(json!({ "category_id": books.id, "filters": { flags.id.to_string(): [true] } })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "bool array query is not supported");
}
