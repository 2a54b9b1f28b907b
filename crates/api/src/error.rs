use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use worldweaver_core::error::{CoreError, FieldViolation};
use worldweaver_db::ServiceError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ServiceError`] for hosted
/// service failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `worldweaver_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the hosted data service.
    #[error("Hosted service error: {0}")]
    Service(#[from] ServiceError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a missing entity.
    pub fn not_found(entity: &'static str, id: worldweaver_core::types::EntityId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}

/// DTO length rules are reported the same way as card field violations.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                    FieldViolation::new(field.clone(), message)
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self::Core(CoreError::InvalidFields(violations))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields: Option<Vec<FieldViolation>> = None;

        let (status, code, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
                CoreError::InvalidFields(violations) => {
                    let message = match violations.as_slice() {
                        [only] => only.message.clone(),
                        _ => format!("{} fields are invalid", violations.len()),
                    };
                    fields = Some(violations);
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Hosted service errors ---
            AppError::Service(err) => classify_service_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a hosted service error into an HTTP status, error code, and message.
///
/// - `23505` unique violation maps to 409.
/// - `23503` foreign key and `23502` not-null violations map to 400.
/// - `PGRST116` (no row for a single-object read) maps to 404.
/// - `42501` row-level policy denial maps to 403.
/// - A 401 from the service maps to 401.
/// - Everything else maps to 500 with a sanitized message.
fn classify_service_error(err: &ServiceError) -> (StatusCode, &'static str, String) {
    match err.code() {
        Some("23505") => {
            return (
                StatusCode::CONFLICT,
                "CONFLICT",
                "A record with this information already exists".to_string(),
            )
        }
        Some("23503") => {
            return (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Referenced record does not exist".to_string(),
            )
        }
        Some("23502") => {
            return (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Required field is missing".to_string(),
            )
        }
        Some("PGRST116") => {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            )
        }
        Some("42501") => {
            return (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "You do not have permission to perform this action".to_string(),
            )
        }
        _ => {}
    }

    if err.status() == Some(401) {
        return (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Session is invalid or expired".to_string(),
        );
    }

    tracing::error!(error = %err, code = ?err.code(), "Hosted service error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
