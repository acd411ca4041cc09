use super::*;
use crate::error::ServiceError;
use crate::model::{Category, Tag};
use crate::store::connect;
use sqlx::SqlitePool;

async fn pool() -> SqlitePool {
    connect("sqlite::memory:", 1).await.unwrap()
}

async fn new_tag(pool: &SqlitePool, name: &str) -> Tag {
    let mut conn = pool.acquire().await.unwrap();
    create::<Tag>(&mut conn, &[("name", name.into())]).await.unwrap()
}

#[tokio::test]
async fn test_create_and_get() {
    let pool = pool().await;
    let tag = new_tag(&pool, "sci-fi").await;
    assert!(tag.id > 0);
    assert!(tag.deleted_at.is_none());

    let mut conn = pool.acquire().await.unwrap();
    let fetched = get::<Tag>(&mut conn, tag.id).await.unwrap();
    assert_eq!(fetched, tag);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();
    let err = get::<Category>(&mut conn, 42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "category" }));
}

#[tokio::test]
async fn test_soft_delete_hides_row_until_restored() {
    let pool = pool().await;
    let tag = new_tag(&pool, "fantasy").await;
    let mut conn = pool.acquire().await.unwrap();

    let n = soft_delete::<Tag>(&mut conn, &[Filter::eq("id", tag.id)]).await.unwrap();
    assert_eq!(n, 1);
    assert!(get::<Tag>(&mut conn, tag.id).await.is_err());
    assert!(is_deleted::<Tag>(&mut conn, tag.id).await.unwrap());

    // A second soft delete touches nothing.
    let n = soft_delete::<Tag>(&mut conn, &[Filter::eq("id", tag.id)]).await.unwrap();
    assert_eq!(n, 0);

    let n = restore::<Tag>(&mut conn, &[Filter::eq("id", tag.id)]).await.unwrap();
    assert_eq!(n, 1);
    assert!(!is_deleted::<Tag>(&mut conn, tag.id).await.unwrap());

    // Restoring an active row is a no-op.
    let n = restore::<Tag>(&mut conn, &[Filter::eq("id", tag.id)]).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn test_hard_delete_removes_row() {
    let pool = pool().await;
    let tag = new_tag(&pool, "gone").await;
    let mut conn = pool.acquire().await.unwrap();
    delete::<Tag>(&mut conn, &[Filter::eq("id", tag.id)], DeleteMode::Hard)
        .await
        .unwrap();
    let err = get_unscoped::<Tag>(&mut conn, tag.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn test_hard_delete_requires_filters() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();
    let err = hard_delete::<Tag>(&mut conn, &[]).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParams(_)));
}

#[tokio::test]
async fn test_duplicate_check_sees_tombstoned_rows() {
    let pool = pool().await;
    let tag = new_tag(&pool, "dup").await;
    let mut conn = pool.acquire().await.unwrap();

    let found = duplicate_check::<Tag>(&mut conn, &[Filter::eq("name", "dup")])
        .await
        .unwrap();
    assert_eq!(found, Some((tag.id, false)));

    soft_delete::<Tag>(&mut conn, &[Filter::eq("id", tag.id)]).await.unwrap();
    let found = duplicate_check::<Tag>(&mut conn, &[Filter::eq("name", "dup")])
        .await
        .unwrap();
    assert_eq!(found, Some((tag.id, true)));

    let none = duplicate_check::<Tag>(&mut conn, &[Filter::eq("name", "other")])
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_update_bumps_updated_at() {
    let pool = pool().await;
    let tag = new_tag(&pool, "old").await;
    let mut conn = pool.acquire().await.unwrap();
    let n = update::<Tag>(&mut conn, &[Filter::eq("id", tag.id)], &[("name", "new".into())])
        .await
        .unwrap();
    assert_eq!(n, 1);
    let fetched = get::<Tag>(&mut conn, tag.id).await.unwrap();
    assert_eq!(fetched.name, "new");
    assert!(fetched.updated_at >= tag.updated_at);
}

#[tokio::test]
async fn test_get_list_paginates_and_counts() {
    let pool = pool().await;
    for i in 0..7 {
        new_tag(&pool, &format!("tag-{i}")).await;
    }
    let mut conn = pool.acquire().await.unwrap();
    let (rows, total) = get_list::<Tag>(
        &mut conn,
        Scope::Active,
        &[],
        &[OrderBy::asc("id")],
        &Pagination::new(2, 3),
    )
    .await
    .unwrap();
    assert_eq!(total, 7);
    let names: Vec<_> = rows.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["tag-3", "tag-4", "tag-5"]);

    let (rows, total) = get_list::<Tag>(
        &mut conn,
        Scope::Active,
        &[],
        &[OrderBy::asc("id")],
        &Pagination::unpaged(),
    )
    .await
    .unwrap();
    assert_eq!(total, 7);
    assert_eq!(rows.len(), 7);
}

#[tokio::test]
async fn test_pluck_ids_respects_scope() {
    let pool = pool().await;
    let a = new_tag(&pool, "a").await;
    let b = new_tag(&pool, "b").await;
    let mut conn = pool.acquire().await.unwrap();
    soft_delete::<Tag>(&mut conn, &[Filter::eq("id", b.id)]).await.unwrap();

    let active = pluck_ids::<Tag>(&mut conn, Scope::Active, &[]).await.unwrap();
    assert_eq!(active, vec![a.id]);
    let all = pluck_ids::<Tag>(&mut conn, Scope::Unscoped, &[]).await.unwrap();
    assert_eq!(all, vec![a.id, b.id]);
}
