//! Persistent entities, closed enums and response views.

mod category;
mod collection;
mod field;
mod field_type;
mod field_value;
mod item;
mod kind;
mod status;
mod tag;
mod user;
mod view;

pub use category::Category;
pub use collection::Collection;
pub use field::Field;
pub use field_type::FieldType;
pub use field_value::ItemFieldValue;
pub use item::Item;
pub use kind::EntityKind;
pub use status::ItemStatus;
pub use tag::Tag;
pub use user::{User, ROLE_ADMIN};
pub use view::{
    CategoryDetail, CategoryRef, CollectionView, FieldValueView, FieldView, ItemDetail,
    ListResponse, TagView,
};

use thiserror::Error;

/// An integer code that does not map onto a closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown {kind} code: {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: i64,
}
