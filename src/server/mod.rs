//! REST surface: routing, envelopes, extractors and shutdown.

pub mod auth;
pub mod error_mapping;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod shutdown;

use axum::middleware::from_extractor_with_state;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::context::AppContext;
use crate::cors::build_cors_layer;
use crate::http_logging::HttpLoggingLayer;
use auth::Authenticated;

pub use shutdown::{listen_for_signals, serve_until_shutdown, shutdown_signal, ShutdownSignal};

/// Reads stay open; `writes` only run for authenticated callers.
fn guarded(
    ctx: &AppContext,
    reads: Router<AppContext>,
    writes: Router<AppContext>,
) -> Router<AppContext> {
    writes
        .route_layer(from_extractor_with_state::<Authenticated, _>(ctx.clone()))
        .merge(reads)
}

fn category_routes(ctx: &AppContext) -> Router<AppContext> {
    use handlers::category;
    guarded(
        ctx,
        Router::new()
            .route("/list", get(category::list))
            .route("/:id", get(category::get)),
        Router::new()
            .route("/", post(category::create))
            .route("/:id", patch(category::rename).delete(category::delete))
            .route("/:id/restore", post(category::restore)),
    )
}

fn collection_routes(ctx: &AppContext) -> Router<AppContext> {
    use handlers::collection;
    guarded(
        ctx,
        Router::new()
            .route("/list", get(collection::list))
            .route("/:id", get(collection::get)),
        Router::new()
            .route("/", post(collection::create))
            .route(
                "/:id",
                patch(collection::update).delete(collection::delete),
            )
            .route("/:id/restore", post(collection::restore)),
    )
}

fn tag_routes(ctx: &AppContext) -> Router<AppContext> {
    use handlers::tag;
    guarded(
        ctx,
        Router::new()
            .route("/list", get(tag::list))
            .route("/:id", get(tag::get)),
        Router::new()
            .route("/", post(tag::create))
            .route("/:id", patch(tag::rename).delete(tag::delete))
            .route("/:id/restore", post(tag::restore)),
    )
}

fn field_routes(ctx: &AppContext) -> Router<AppContext> {
    use handlers::field;
    guarded(
        ctx,
        Router::new(),
        Router::new()
            .route("/", post(field::create))
            .route("/:id", delete(field::delete))
            .route("/:id/restore", post(field::restore)),
    )
}

fn item_routes(ctx: &AppContext) -> Router<AppContext> {
    use handlers::item;
    guarded(
        ctx,
        Router::new()
            .route("/list", get(item::list))
            .route("/search", post(item::search))
            .route("/:id", get(item::get)),
        Router::new()
            .route("/", post(item::create))
            .route("/:id", put(item::update).delete(item::delete))
            .route("/:id/restore", post(item::restore))
            .route(
                "/:id/tag/:tag_id",
                post(item::add_tag).delete(item::remove_tag),
            )
            .route(
                "/:id/collection/:collection_id",
                post(item::add_to_collection).delete(item::remove_from_collection),
            ),
    )
}

fn recycle_bin_routes(ctx: &AppContext) -> Router<AppContext> {
    use handlers::recycle_bin;
    guarded(
        ctx,
        Router::new().route("/list", get(recycle_bin::list)),
        Router::new()
            .route("/restore", post(recycle_bin::restore))
            .route("/delete", post(recycle_bin::delete))
            .route("/clear", post(recycle_bin::clear)),
    )
}

fn user_routes(ctx: &AppContext) -> Router<AppContext> {
    use handlers::user;
    guarded(
        ctx,
        Router::new()
            .route("/login", post(user::login))
            .route("/enabled", get(user::enabled)),
        Router::new().route("/update", post(user::update)),
    )
}

/// Routes under `/api` without the outer layers.
pub fn api_routes(ctx: &AppContext) -> Router<AppContext> {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/category", category_routes(ctx))
        .nest("/collection", collection_routes(ctx))
        .nest("/tag", tag_routes(ctx))
        .nest("/field", field_routes(ctx))
        .nest("/item", item_routes(ctx))
        .nest("/recycle-bin", recycle_bin_routes(ctx))
        .nest("/user", user_routes(ctx))
}

/// The full application: `/api` routes, CORS and request logging.
pub fn build_router(ctx: AppContext, cors_origins: Vec<String>) -> Router {
    Router::new()
        .nest("/api", api_routes(&ctx))
        .layer(build_cors_layer(cors_origins))
        .layer(HttpLoggingLayer)
        .with_state(ctx)
}
