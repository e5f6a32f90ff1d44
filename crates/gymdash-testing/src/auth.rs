//! Mock session helpers for integration tests.
//!
//! Services validate a session token signed by the identity provider bridge.
//! In tests, `MockSession` signs one with a shared test secret so no real
//! provider is needed.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use gymdash_auth_types::cookie::SESSION_COOKIE;
use gymdash_auth_types::token::{SessionClaims, issue_session_token};

/// Secret shared by test routers and `MockSession`.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-integration-tests";

/// Configurable identity minted into a session token.
pub struct MockSession {
    pub subject_id: String,
    pub emails: Vec<String>,
    pub ttl_secs: i64,
}

impl MockSession {
    pub fn new(subject_id: &str) -> Self {
        Self {
            subject_id: subject_id.to_owned(),
            emails: vec![],
            ttl_secs: 3600,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.emails.push(email.to_owned());
        self
    }

    /// Negative values produce an already-expired token.
    pub fn with_ttl(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Signed session token for [`TEST_SESSION_SECRET`].
    pub fn token(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        let mut emails = self.emails.iter().cloned();
        let claims = SessionClaims {
            sub: self.subject_id.clone(),
            email: emails.next(),
            emails: emails.collect(),
            exp: (now + self.ttl_secs).max(0) as u64,
        };
        issue_session_token(&claims, TEST_SESSION_SECRET).expect("sign test session token")
    }

    /// `Authorization: Bearer <token>` header value.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).expect("valid header value")
    }

    /// `Cookie: __session=<token>` header value.
    pub fn cookie(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={}", self.token()))
            .expect("valid header value")
    }

    /// Headers carrying the token in the session cookie.
    pub fn cookie_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(HeaderName::from_static("cookie"), self.cookie());
        map
    }
}
