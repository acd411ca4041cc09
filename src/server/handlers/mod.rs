//! One module per resource. Handlers only decode the request and shape the
//! envelope; the work happens in `crate::service`.

pub mod category;
pub mod collection;
pub mod field;
pub mod item;
pub mod recycle_bin;
pub mod tag;
pub mod user;

use serde::Deserialize;

use super::response::{ok, ApiResult};

/// `{ "name": ... }` body of create and rename requests.
#[derive(Debug, Deserialize)]
pub struct NameBody {
    pub name: String,
}

pub async fn health() -> ApiResult<&'static str> {
    ok("ok")
}
