use serde::Deserialize;
use tracing::info;

use super::{ensure_unique, lifecycle, require_id, require_name};
use crate::context::AppContext;
use crate::error::ServiceError;
use crate::model::{Category, Field, FieldType, FieldView};
use crate::repository::{self, Filter};

/// Body of a field create request. `type` stays a raw code until validated
/// so an unknown code can be reported as such.
#[derive(Debug, Clone, Deserialize)]
pub struct NewField {
    pub category_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: i64,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub required: bool,
}

impl NewField {
    fn validate(&self) -> Result<(String, FieldType), ServiceError> {
        require_id(self.category_id, "category_id")?;
        let name = require_name(&self.name)?;
        let field_type = FieldType::try_from(self.field_type)
            .map_err(|_| ServiceError::UnsupportedFieldType(self.field_type))?;
        if self.is_array && !field_type.supports_array() {
            return Err(ServiceError::UnsupportedArrayField(field_type));
        }
        Ok((name, field_type))
    }
}

pub async fn create(ctx: &AppContext, input: &NewField) -> Result<FieldView, ServiceError> {
    let (name, field_type) = input.validate()?;
    let mut tx = ctx.pool.begin().await?;
    repository::get::<Category>(&mut tx, input.category_id).await?;
    ensure_unique::<Field>(
        &mut tx,
        vec![
            Filter::eq("category_id", input.category_id),
            Filter::eq("name", name.as_str()),
        ],
        None,
    )
    .await?;
    let field = repository::create::<Field>(
        &mut tx,
        &[
            ("category_id", input.category_id.into()),
            ("name", name.into()),
            ("type", field_type.code().into()),
            ("is_array", input.is_array.into()),
            ("required", input.required.into()),
        ],
    )
    .await?;
    tx.commit().await?;
    info!(
        field_id = field.id,
        category_id = field.category_id,
        field_type = %field.field_type,
        "field created"
    );
    Ok(FieldView::from(&field))
}

pub async fn delete(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::delete::<Field>(ctx, id).await
}

/// Restores the field and its values. A tombstoned category comes back
/// alone; its other fields stay deleted.
pub async fn restore(ctx: &AppContext, id: i64) -> Result<(), ServiceError> {
    lifecycle::restore::<Field>(ctx, id).await
}
