//! Typed EAV values: coercion of request values, encoding into storage
//! rows, search predicates, and decoding back into response values.

pub mod coerce;
mod codec;
mod hydrate;
mod query;

pub use codec::{encode, store_values, FieldValueData};
pub use hydrate::{hydrate_values, row_value};
pub use query::{build_filter, value_exists, DatetimeRange};

#[cfg(test)]
#[path = "../field_value_tests.rs"]
mod field_value_tests;
