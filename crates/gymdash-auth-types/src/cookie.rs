//! Session token lookup in request headers.

use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;

/// Cookie the identity provider's frontend SDK stores the session token in.
pub const SESSION_COOKIE: &str = "__session";

/// Find the session token, preferring the session cookie over an
/// `Authorization: Bearer` header. Empty values count as absent.
///
/// ```
/// use http::HeaderMap;
/// use gymdash_auth_types::cookie::session_token;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("cookie", "theme=dark; __session=abc".parse().unwrap());
/// assert_eq!(session_token(&headers).as_deref(), Some("abc"));
/// ```
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_owned());
        }
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned())
        .filter(|token| !token.is_empty())
}
