//! Session-token validation.
//!
//! The identity provider bridge signs a short-lived HS256 JWT per session. The
//! subject id is the provider's opaque user id; emails are optional.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_TESTING", test))]
use serde::Serialize;

use gymdash_domain::id::{Email, SubjectId};

/// Identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub subject_id: SubjectId,
    /// Valid, normalized, deduplicated emails; `email` claim first.
    pub emails: Vec<Email>,
    pub exp: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload of a session token.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | provider subject id (opaque string) |
/// | `email` | custom | primary email, optional |
/// | `emails` | custom | additional emails, optional |
/// | `exp` | `exp` | expiration, seconds since epoch |
///
/// [`Serialize`] is only available with the **`USE_ONLY_IN_TESTING`** feature:
/// services never mint session tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_TESTING", test), derive(Serialize))]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    pub exp: u64,
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session token, returning the parsed identity.
///
/// Emails that fail to parse are dropped rather than rejecting the session.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let subject_id = SubjectId::new(claims.sub).map_err(|_| AuthError::Malformed)?;

    let mut emails: Vec<Email> = Vec::new();
    for raw in claims.email.iter().chain(claims.emails.iter()) {
        match Email::parse(raw) {
            Ok(email) if !emails.contains(&email) => emails.push(email),
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "ignoring unusable session email"),
        }
    }

    Ok(SessionInfo {
        subject_id,
        emails,
        exp: claims.exp,
    })
}

/// Sign session claims. Test tooling only.
#[cfg(any(feature = "USE_ONLY_IN_TESTING", test))]
pub fn issue_session_token(
    claims: &SessionClaims,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
}
