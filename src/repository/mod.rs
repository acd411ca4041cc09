//! Generic, table-agnostic persistence operations.
//!
//! Every operation takes a `&mut SqliteConnection`, so callers decide whether
//! it runs inside a transaction.

mod crud_ops;
mod entity;
mod filter;
mod links;
mod pagination;

pub use crud_ops::{
    create, delete, duplicate_check, find, get, get_list, get_unscoped, hard_delete, is_deleted,
    pluck_ids, restore, soft_delete, update, Assignment,
};
pub use entity::{BindArgs, DeleteMode, Entity, SqlArg};
pub use filter::{
    matching_ids, merge_wheres, render_order, render_where, Filter, Join, Op, OrderBy, Scope,
};
pub use links::{link, linked, unlink, LinkTable};
pub use pagination::Pagination;

#[cfg(test)]
#[path = "../repository_tests.rs"]
mod repository_tests;
