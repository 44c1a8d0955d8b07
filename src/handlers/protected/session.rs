use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::cookie;

/// GET /checkLogin - cheap probe the frontend uses to gate routes. Reaching
/// this handler at all means the middleware accepted the cookie.
pub async fn check_login() -> Json<Value> {
    Json(json!({ "isLoggedIn": true }))
}

/// POST /user/logout - overwrite the session cookie with an expired empty
/// value. Client-side only: the token itself remains valid until its expiry.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        jar.add(cookie::expired_cookie()),
        Json(json!({ "message": "Logged out successfully" })),
    )
}
