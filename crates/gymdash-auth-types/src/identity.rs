//! Session identity extractor.

use std::fmt;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use gymdash_domain::id::{Email, SubjectId};

use crate::cookie::session_token;
use crate::token::validate_session_token;

/// HMAC secret used to validate session tokens.
///
/// Installed on the router as an `Extension` so extraction does not depend on
/// the concrete application state type.
#[derive(Clone)]
pub struct SessionSecret(Arc<str>);

impl SessionSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}

/// Authenticated identity of the caller.
///
/// Returns 401 if the session token is absent or invalid, 500 if the router
/// was built without a [`SessionSecret`] extension.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub subject_id: SubjectId,
    pub emails: Vec<Email>,
}

impl SessionIdentity {
    /// The email used for role lookups and legacy data migration.
    pub fn primary_email(&self) -> Option<&Email> {
        self.emails.first()
    }
}

impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Same shape as axum-core 0.5's trait signature: read everything from `parts`
    // synchronously, then return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = parts.extensions.get::<SessionSecret>().cloned();
        let token = session_token(&parts.headers);

        async move {
            let Some(secret) = secret else {
                tracing::error!("session secret extension is not installed");
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            };
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info = validate_session_token(&token, secret.as_str()).map_err(|e| {
                tracing::debug!(error = %e, "rejected session token");
                StatusCode::UNAUTHORIZED
            })?;
            Ok(Self {
                subject_id: info.subject_id,
                emails: info.emails,
            })
        }
    }
}
