//! Basic CRUD operations for any [`Entity`].
use chrono::Utc;
use sqlx::{Sqlite, SqliteConnection};

use super::filter::{render_order, render_where, Filter, OrderBy, Scope};
use super::{BindArgs, DeleteMode, Entity, Pagination, SqlArg};
use crate::error::ServiceError;

/// A `column = value` pair for inserts and updates.
pub type Assignment = (&'static str, SqlArg);

/// Insert a row and return it. `created_at`/`updated_at` are filled in here.
pub async fn create<T: Entity>(
    conn: &mut SqliteConnection,
    columns: &[Assignment],
) -> Result<T, ServiceError> {
    let now = Utc::now();
    let mut names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    names.extend(["created_at", "updated_at"]);
    let mut args: Vec<SqlArg> = columns.iter().map(|(_, value)| value.clone()).collect();
    args.extend([SqlArg::Time(now), SqlArg::Time(now)]);

    let placeholders = vec!["?"; names.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders}) RETURNING *",
        T::TABLE,
        names.join(", ")
    );
    let row = sqlx::query_as::<Sqlite, T>(&sql)
        .bind_args(&args)
        .fetch_one(&mut *conn)
        .await?;
    Ok(row)
}

/// Fetch the first row matching `filters`, ordered by id.
pub async fn find<T: Entity>(
    conn: &mut SqliteConnection,
    scope: Scope,
    filters: &[Filter],
) -> Result<Option<T>, ServiceError> {
    let (where_sql, args) = render_where(T::TABLE, scope, filters);
    let sql = format!("SELECT * FROM {}{where_sql} ORDER BY id LIMIT 1", T::TABLE);
    let row = sqlx::query_as::<Sqlite, T>(&sql)
        .bind_args(&args)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Get an active row by id.
pub async fn get<T: Entity>(conn: &mut SqliteConnection, id: i64) -> Result<T, ServiceError> {
    find::<T>(conn, Scope::Active, &[Filter::eq("id", id)])
        .await?
        .ok_or_else(|| ServiceError::not_found(T::NAME))
}

/// Get a row by id, tombstoned or not.
pub async fn get_unscoped<T: Entity>(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<T, ServiceError> {
    find::<T>(conn, Scope::Unscoped, &[Filter::eq("id", id)])
        .await?
        .ok_or_else(|| ServiceError::not_found(T::NAME))
}

/// List rows with filters, ordering and pagination. Returns the page and the
/// total number of matching rows.
pub async fn get_list<T: Entity>(
    conn: &mut SqliteConnection,
    scope: Scope,
    filters: &[Filter],
    order: &[OrderBy],
    pagination: &Pagination,
) -> Result<(Vec<T>, i64), ServiceError> {
    let (where_sql, mut args) = render_where(T::TABLE, scope, filters);

    let count_sql = format!("SELECT COUNT(*) FROM {}{where_sql}", T::TABLE);
    let total = sqlx::query_scalar::<Sqlite, i64>(&count_sql)
        .bind_args(&args)
        .fetch_one(&mut *conn)
        .await?;

    let mut sql = format!("SELECT * FROM {}{where_sql}{}", T::TABLE, render_order(order));
    if !pagination.disable {
        sql.push_str(" LIMIT ? OFFSET ?");
        args.push(SqlArg::Int(pagination.limit()));
        args.push(SqlArg::Int(pagination.offset()));
    }
    let rows = sqlx::query_as::<Sqlite, T>(&sql)
        .bind_args(&args)
        .fetch_all(&mut *conn)
        .await?;
    Ok((rows, total))
}

/// Update active rows matching `filters`; bumps `updated_at`.
pub async fn update<T: Entity>(
    conn: &mut SqliteConnection,
    filters: &[Filter],
    assignments: &[Assignment],
) -> Result<u64, ServiceError> {
    let mut sets: Vec<String> = assignments
        .iter()
        .map(|(column, _)| format!("{column} = ?"))
        .collect();
    sets.push("updated_at = ?".to_string());
    let mut args: Vec<SqlArg> = assignments.iter().map(|(_, v)| v.clone()).collect();
    args.push(SqlArg::Time(Utc::now()));

    let (where_sql, where_args) = render_where(T::TABLE, Scope::Active, filters);
    args.extend(where_args);
    let sql = format!("UPDATE {} SET {}{where_sql}", T::TABLE, sets.join(", "));
    let result = sqlx::query::<Sqlite>(&sql)
        .bind_args(&args)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Tombstone active rows matching `filters`. Rows that already carry a
/// tombstone keep their original deletion time.
pub async fn soft_delete<T: Entity>(
    conn: &mut SqliteConnection,
    filters: &[Filter],
) -> Result<u64, ServiceError> {
    let (where_sql, where_args) = render_where(T::TABLE, Scope::Active, filters);
    let mut args = vec![SqlArg::Time(Utc::now())];
    args.extend(where_args);
    let sql = format!("UPDATE {} SET deleted_at = ?{where_sql}", T::TABLE);
    let result = sqlx::query::<Sqlite>(&sql)
        .bind_args(&args)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Remove rows matching `filters`, tombstoned or not.
pub async fn hard_delete<T: Entity>(
    conn: &mut SqliteConnection,
    filters: &[Filter],
) -> Result<u64, ServiceError> {
    if filters.is_empty() {
        return Err(ServiceError::invalid(format!(
            "refusing to delete every {} row",
            T::NAME
        )));
    }
    let (where_sql, args) = render_where(T::TABLE, Scope::Unscoped, filters);
    let sql = format!("DELETE FROM {}{where_sql}", T::TABLE);
    let result = sqlx::query::<Sqlite>(&sql)
        .bind_args(&args)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Soft or hard delete depending on `mode`.
pub async fn delete<T: Entity>(
    conn: &mut SqliteConnection,
    filters: &[Filter],
    mode: DeleteMode,
) -> Result<u64, ServiceError> {
    match mode {
        DeleteMode::Soft => soft_delete::<T>(conn, filters).await,
        DeleteMode::Hard => hard_delete::<T>(conn, filters).await,
    }
}

/// Clear the tombstone of rows matching `filters`.
pub async fn restore<T: Entity>(
    conn: &mut SqliteConnection,
    filters: &[Filter],
) -> Result<u64, ServiceError> {
    let mut all = vec![Filter::is_not_null(&format!("{}.deleted_at", T::TABLE))];
    all.extend_from_slice(filters);
    let (where_sql, args) = render_where(T::TABLE, Scope::Unscoped, &all);
    let sql = format!("UPDATE {} SET deleted_at = NULL{where_sql}", T::TABLE);
    let result = sqlx::query::<Sqlite>(&sql)
        .bind_args(&args)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Look for an existing row (tombstoned rows included) matching the unique
/// columns in `filters`. Returns its id and whether it is tombstoned.
pub async fn duplicate_check<T: Entity>(
    conn: &mut SqliteConnection,
    filters: &[Filter],
) -> Result<Option<(i64, bool)>, ServiceError> {
    let found = find::<T>(conn, Scope::Unscoped, filters).await?;
    Ok(found.map(|row| (row.id(), row.is_deleted())))
}

/// Whether the row with `id` is tombstoned. Missing rows are `NotFound`.
pub async fn is_deleted<T: Entity>(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, ServiceError> {
    Ok(get_unscoped::<T>(conn, id).await?.is_deleted())
}

/// Ids of rows matching `filters`, ascending.
pub async fn pluck_ids<T: Entity>(
    conn: &mut SqliteConnection,
    scope: Scope,
    filters: &[Filter],
) -> Result<Vec<i64>, ServiceError> {
    let (where_sql, args) = render_where(T::TABLE, scope, filters);
    let sql = format!("SELECT id FROM {}{where_sql} ORDER BY id", T::TABLE);
    let ids = sqlx::query_scalar::<Sqlite, i64>(&sql)
        .bind_args(&args)
        .fetch_all(&mut *conn)
        .await?;
    Ok(ids)
}
