use crate::auth::jwt::TokenService;
use crate::types::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// The only route reachable through the gate without a token.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Reads the raw token from the `Authorization` header.
///
/// Accepts both `Authorization: <token>` and `Authorization: Bearer <token>`.
/// Returns `None` when the header is absent, not visible ASCII, or empty.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    (!token.is_empty()).then_some(token)
}

/// Rejects every request without a valid bearer token, except the login route.
///
/// The login route is matched by exact path so that nothing below it is
/// exempted by accident. Allowed requests continue unmodified.
pub async fn auth_gate(
    State(tokens): State<Arc<TokenService>>,
    req: Request,
    next: Next,
) -> Response {
    if req.uri().path() == LOGIN_PATH {
        return next.run(req).await;
    }

    let allowed = extract_token(req.headers()).is_some_and(|token| tokens.verify(token));

    if !allowed {
        tracing::debug!(path = %req.uri().path(), "rejected unauthenticated request");
        return AppError::Unauthorized.into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router, middleware,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use axum::http::{HeaderName, HeaderValue, StatusCode};

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new("gate-test-secret-at-least-32-chars", 3600))
    }

    fn gated_app(tokens: Arc<TokenService>) -> TestServer {
        let app = Router::new()
            .route("/api/v1/test", get(|| async { "Success" }))
            .route(LOGIN_PATH, post(|| async { "Login Success" }))
            .route("/api/v1/auth/login/extra", post(|| async { "Nested" }))
            .layer(middleware::from_fn_with_state(tokens, auth_gate));

        TestServer::new(app).expect("test server")
    }

    fn authorization(value: &str) -> (HeaderName, HeaderValue) {
        (
            header::AUTHORIZATION,
            HeaderValue::from_str(value).expect("header value"),
        )
    }

    #[tokio::test]
    async fn test_login_passes_without_token() {
        let server = gated_app(tokens());

        let response = server.post(LOGIN_PATH).await;
        response.assert_status_ok();
        response.assert_text("Login Success");
    }

    #[tokio::test]
    async fn test_login_prefix_is_not_exempt() {
        let server = gated_app(tokens());

        let response = server.post("/api/v1/auth/login/extra").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let server = gated_app(tokens());

        let response = server.get("/api/v1/test").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_text("Unauthorized");
    }

    #[tokio::test]
    async fn test_empty_and_null_headers_are_rejected() {
        let server = gated_app(tokens());

        for value in ["", "null", "Bearer "] {
            let (name, value) = authorization(value);
            let response = server.get("/api/v1/test").add_header(name, value).await;
            response.assert_status(StatusCode::UNAUTHORIZED);
            response.assert_text("Unauthorized");
        }
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let server = gated_app(tokens());
        let foreign = TokenService::new("some-other-secret-at-least-32-chars", 3600)
            .issue(1)
            .expect("issue");

        for value in ["invalid-token".to_string(), foreign] {
            let (name, value) = authorization(&value);
            let response = server.get("/api/v1/test").add_header(name, value).await;
            response.assert_status(StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_valid_token_passes_raw_or_bearer() {
        let tokens = tokens();
        let token = tokens.issue(1).expect("issue");
        let server = gated_app(tokens);

        for value in [token.clone(), format!("Bearer {token}")] {
            let (name, value) = authorization(&value);
            let response = server.get("/api/v1/test").add_header(name, value).await;
            response.assert_status_ok();
            response.assert_text("Success");
        }
    }

    #[test]
    fn test_extract_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(""));
        assert_eq!(extract_token(&headers), None);
    }
}
