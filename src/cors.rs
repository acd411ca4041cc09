use http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Build a CORS layer for the REST API with the given allowed origins.
///
/// Origins must match an entry exactly. Pass "*" in the origins list to allow
/// all origins.
pub fn build_cors_layer(cors_origins: Vec<String>) -> CorsLayer {
    let allow_origin = if cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|o| {
                HeaderValue::from_str(o.trim())
                    .inspect_err(|_| warn!(origin = %o, "ignoring malformed CORS origin"))
                    .ok()
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, CONTENT_LENGTH, CONTENT_TYPE, AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use axum::Router;
    use http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
    use http::Request;
    use tower::ServiceExt;

    async fn allowed_origin(origins: &[&str], origin: &str) -> Option<HeaderValue> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(build_cors_layer(
                origins.iter().map(ToString::to_string).collect(),
            ));
        let response = app
            .oneshot(
                Request::get("/")
                    .header(ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).cloned()
    }

    #[tokio::test]
    async fn test_configured_origin_is_echoed() {
        let got = allowed_origin(&["http://localhost:3000"], "http://localhost:3000").await;
        assert_eq!(got.unwrap(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_origin_sharing_a_prefix_is_refused() {
        let got = allowed_origin(
            &["http://localhost:3000"],
            "http://localhost:3000.evil.example",
        )
        .await;
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let got = allowed_origin(&["*"], "http://anywhere.example").await;
        assert_eq!(got.unwrap(), "*");
    }
}
