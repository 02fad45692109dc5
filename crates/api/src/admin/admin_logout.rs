use crate::shared::auth::ADMIN_SESSION_COOKIE;
use actix_web::{
    cookie::{time::Duration, Cookie},
    HttpResponse,
};
use renewal_tracker_api_structs::admin_logout::APIResponse;

/// Expires the session cookie. Other sessions stay valid until the server
/// restarts with a new session token.
pub async fn admin_logout_controller() -> HttpResponse {
    let cookie = Cookie::build(ADMIN_SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .finish();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(APIResponse { ok: true })
}
