// =============================================================================
// Bearer Token Authentication — Axum Extractor
// =============================================================================
//
// Validates the `Authorization: Bearer <token>` header against the
// `HORIZON_ADMIN_TOKEN` environment variable. Comparison is performed in
// constant time.
//
//   async fn handler(_auth: AuthBearer, ...) { ... }
//
// If the token is missing or invalid the extractor short-circuits the
// request with a 403 before the handler body executes.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Environment variable holding the expected admin token.
const TOKEN_ENV: &str = "HORIZON_ADMIN_TOKEN";

/// Compare two byte slices in constant time. Always examines every byte so a
/// mismatch position is not observable through timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Axum extractor yielding the validated raw token string.
pub struct AuthBearer(pub String);

/// Rejection returned when authentication fails.
pub struct AuthRejection {
    status: StatusCode,
    message: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
        });
        (self.status, axum::Json(body)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthBearer
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Read on every request so token rotation needs no restart.
        let expected = std::env::var(TOKEN_ENV).unwrap_or_default();

        if expected.is_empty() {
            warn!("{TOKEN_ENV} is not set — all authenticated requests will be rejected");
            return Err(AuthRejection {
                status: StatusCode::FORBIDDEN,
                message: "Server authentication not configured",
            });
        }

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(value) if value.starts_with("Bearer ") => &value[7..],
            _ => {
                warn!("Missing or malformed Authorization header");
                return Err(AuthRejection {
                    status: StatusCode::FORBIDDEN,
                    message: "Missing or invalid authorization token",
                });
            }
        };

        if !constant_time_eq(token.as_bytes(), expected.as_bytes()) {
            warn!("Invalid admin token presented");
            return Err(AuthRejection {
                status: StatusCode::FORBIDDEN,
                message: "Invalid authorization token",
            });
        }

        Ok(AuthBearer(token.to_string()))
    }
}
