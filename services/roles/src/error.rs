use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Roles service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RolesServiceError {
    #[error("role not found")]
    RoleNotFound,
    #[error("invalid role type")]
    InvalidRoleType,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid query")]
    InvalidQuery,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RolesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::InvalidRoleType => "INVALID_ROLE_TYPE",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for RolesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RoleNotFound => StatusCode::NOT_FOUND,
            Self::InvalidRoleType | Self::InvalidEmail | Self::InvalidQuery | Self::MissingData => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors and already visible in the TraceLayer span.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
