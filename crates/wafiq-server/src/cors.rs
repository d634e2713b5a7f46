//! Cross-origin access.
//!
//! The front end may be served from another origin than the API, so every
//! response allows any origin and advertises the allowed methods and
//! headers. `OPTIONS` requests never reach a handler.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{Any, CorsLayer};

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

const ALLOW_METHODS_VALUE: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS_VALUE: &str = "Origin, X-Requested-With, Content-Type, Accept, Authorization";

/// CORS layer: any origin, and the preflight answer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

/// Answer any `OPTIONS` request with 200 and an empty body.
///
/// Every response leaving here carries `Access-Control-Allow-Methods` and
/// `Access-Control-Allow-Headers`, not only preflight answers.
pub async fn short_circuit_options(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_METHODS)
        .or_insert_with(|| HeaderValue::from_static(ALLOW_METHODS_VALUE));
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .or_insert_with(|| HeaderValue::from_static(ALLOW_HEADERS_VALUE));
    response
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::middleware;
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/letters", get(|| async { "ok" }))
            .layer(middleware::from_fn(short_circuit_options))
    }

    fn header_str<'a>(response: &'a Response, name: &HeaderName) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn options_gets_empty_200_with_allow_headers() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/anything")
            .body(Body::empty());
        assert!(req.is_ok());
        let Ok(req) = req else { return };

        let response = app().oneshot(req).await;
        assert!(response.is_ok());
        let Ok(response) = response else { return };

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_str(&response, &header::ACCESS_CONTROL_ALLOW_METHODS),
            Some(ALLOW_METHODS_VALUE)
        );
        assert_eq!(
            header_str(&response, &header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some(ALLOW_HEADERS_VALUE)
        );

        let body = axum::body::to_bytes(response.into_body(), 1024).await;
        assert!(body.is_ok_and(|b| b.is_empty()));
    }

    #[tokio::test]
    async fn ordinary_responses_advertise_methods_and_headers() {
        let req = Request::builder().uri("/letters").body(Body::empty());
        assert!(req.is_ok());
        let Ok(req) = req else { return };

        let response = app().oneshot(req).await;
        assert!(response.is_ok());
        let Ok(response) = response else { return };

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_str(&response, &header::ACCESS_CONTROL_ALLOW_METHODS),
            Some(ALLOW_METHODS_VALUE)
        );
        assert_eq!(
            header_str(&response, &header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some(ALLOW_HEADERS_VALUE)
        );
    }
}
