use crate::{
    error::TrackerError,
    shared::auth::{secure_eq, ADMIN_SESSION_COOKIE},
};
use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    web, HttpResponse,
};
use renewal_tracker_api_structs::admin_login::{APIResponse, RequestBody};
use renewal_tracker_infra::TrackerContext;
use tracing::warn;

const SESSION_HOURS: i64 = 12;

/// Exchanges the admin password for a session cookie
pub async fn admin_login_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    let admin_password = ctx.config.admin_password.as_ref().ok_or_else(|| {
        TrackerError::Unauthorized("The admin api is not configured".into())
    })?;

    if !secure_eq(&body.password, admin_password) {
        warn!("Rejected admin login with an invalid password");
        return Err(TrackerError::Unauthorized("Invalid password".into()));
    }

    let cookie = Cookie::build(ADMIN_SESSION_COOKIE, ctx.config.admin_session_token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(SESSION_HOURS))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(APIResponse { ok: true }))
}
