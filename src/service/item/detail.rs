//! Batch hydration of items into response details.

use std::collections::{BTreeSet, HashMap};

use sqlx::SqliteConnection;

use crate::error::ServiceError;
use crate::field_value::hydrate_values;
use crate::model::{
    Category, CategoryRef, Collection, CollectionView, Field, Item, ItemDetail, ItemFieldValue,
    Tag, TagView,
};
use crate::repository::{self, Entity, Filter, LinkTable, OrderBy, Pagination, Scope};

async fn by_ids<T: Entity>(
    conn: &mut SqliteConnection,
    column: &str,
    ids: impl IntoIterator<Item = i64>,
) -> Result<Vec<T>, ServiceError> {
    let (rows, _) = repository::get_list::<T>(
        conn,
        Scope::Active,
        &[Filter::in_list(column, ids)],
        &[OrderBy::asc("id")],
        &Pagination::unpaged(),
    )
    .await?;
    Ok(rows)
}

fn group<T, V>(pairs: &[(i64, T)]) -> HashMap<i64, Vec<V>>
where
    V: for<'a> From<&'a T>,
{
    let mut grouped: HashMap<i64, Vec<V>> = HashMap::new();
    for (item_id, entity) in pairs {
        grouped.entry(*item_id).or_default().push(V::from(entity));
    }
    grouped
}

/// Hydrate `items` with their category, tags, collections and field values,
/// keeping the input order. A fixed number of queries runs regardless of
/// how many items are passed.
pub(crate) async fn load_details(
    conn: &mut SqliteConnection,
    items: Vec<Item>,
) -> Result<Vec<ItemDetail>, ServiceError> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let item_ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    let category_ids: BTreeSet<i64> = items.iter().map(|i| i.category_id).collect();

    let categories: HashMap<i64, CategoryRef> = by_ids::<Category>(conn, "id", category_ids)
        .await?
        .iter()
        .map(|c| (c.id, CategoryRef::from(c)))
        .collect();
    let tag_links = repository::linked::<Tag>(conn, LinkTable::ItemTags, &item_ids).await?;
    let mut tags = group::<Tag, TagView>(&tag_links);
    let collection_links =
        repository::linked::<Collection>(conn, LinkTable::CollectionItems, &item_ids).await?;
    let mut collections = group::<Collection, CollectionView>(&collection_links);

    let values = by_ids::<ItemFieldValue>(conn, "item_id", item_ids.iter().copied()).await?;
    let field_ids: BTreeSet<i64> = values.iter().map(|v| v.field_id).collect();
    let fields: HashMap<i64, Field> = by_ids::<Field>(conn, "id", field_ids)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();
    let mut values_by_item: HashMap<i64, Vec<ItemFieldValue>> = HashMap::new();
    for value in values {
        values_by_item.entry(value.item_id).or_default().push(value);
    }

    let details = items
        .into_iter()
        .map(|item| {
            let id = item.id;
            let rows = values_by_item.remove(&id).unwrap_or_default();
            ItemDetail {
                category: categories.get(&item.category_id).cloned(),
                tags: tags.remove(&id).unwrap_or_default(),
                collections: collections.remove(&id).unwrap_or_default(),
                values: hydrate_values(&rows, &fields),
                item,
            }
        })
        .collect();
    Ok(details)
}
