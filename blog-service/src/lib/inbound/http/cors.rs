use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

const ALLOW_HEADERS: &str = "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, accept, origin, Cache-Control, X-Requested-With";
const ALLOW_METHODS: &str = "POST, OPTIONS, GET, PUT, DELETE";

/// Adds the CORS headers to every response and answers preflights directly.
///
/// `allow_origin` is a single configured origin or `*`, sent together with
/// `Access-Control-Allow-Credentials: true`.
pub async fn cors(
    State(allow_origin): State<HeaderValue>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut(), allow_origin);
        return response;
    }

    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut(), allow_origin);
    response
}

fn apply_cors_headers(headers: &mut HeaderMap, allow_origin: HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
}
