//! Session cookie construction. The token travels in an HTTP-only cookie so
//! script on the page can never read it; `SameSite=None` + `Secure` lets the
//! separately-hosted frontend send it cross-site.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie holding the signed session token.
pub const AUTH_COOKIE: &str = "token";

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::hours(1))
        .build()
}

/// Overwrites the session cookie with an immediately-expired empty value.
/// This is the whole of logout; the token itself stays valid until expiry.
pub fn expired_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::ZERO)
        .build()
}
