use crate::{
    AppState,
    api::extract::{INVALID_BODY, Json},
    auth::middleware::extract_token,
    db::{Filter, models::UserCredentials},
    types::{AppError, LoginRequest, LoginResponse, MessageBody, Result, TokenValidity},
    validation::schemas,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde_json::Value;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid payload or credentials", body = MessageBody)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, AppError>,
) -> Result<Json<LoginResponse>> {
    let Json(body) = body.map_err(|_| AppError::BadRequest(INVALID_BODY.to_string()))?;
    let credentials: LoginRequest = schemas::LOGIN
        .parse(&body)
        .map_err(|e| AppError::BadRequest(e.message().to_string()))?;

    let user = state
        .repo::<UserCredentials>()
        .find_one(Filter::eq("email", credentials.email.as_str()))
        .await?;

    let Some(user) = user else {
        tracing::warn!("login rejected: unknown account");
        return Err(AppError::InvalidCredentials);
    };

    if !state.hasher.verify(&credentials.password, &user.password).await {
        tracing::warn!(user_id = user.id, "login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id)?;
    tracing::info!(user_id = user.id, "login succeeded");

    Ok(Json(LoginResponse {
        message: "login success".to_string(),
        token,
    }))
}

/// Check whether the token in the `Authorization` header is still valid
#[utoipa::path(
    get,
    path = "/api/v1/auth/validate",
    responses(
        (status = 200, description = "Token is valid", body = TokenValidity),
        (status = 400, description = "Token not provided", body = MessageBody),
        (status = 401, description = "Token is invalid or expired", body = TokenValidity)
    ),
    tag = "auth",
    security(("bearer" = []))
)]
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<TokenValidity>)> {
    let token = extract_token(&headers)
        .ok_or_else(|| AppError::BadRequest("Token not provided".to_string()))?;

    let is_valid = state.tokens.verify(token);
    let status = if is_valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    Ok((status, Json(TokenValidity { is_valid })))
}
