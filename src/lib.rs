// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod app;
pub mod config;
pub mod context;
pub mod cors;
pub mod error;
pub mod field_value;
pub mod http_logging;
pub mod logging;
pub mod model;
pub mod repository;
pub mod server;
pub mod service;
pub mod store;

pub use context::AppContext;
pub use error::ServiceError;
