use crate::error::TrackerError;
use actix_web::HttpRequest;
use renewal_tracker_infra::TrackerContext;
use subtle::ConstantTimeEq;

pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

pub fn secure_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn get_header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    let token = token_header_value
        .trim()
        .strip_prefix("Bearer")
        .or_else(|| token_header_value.trim().strip_prefix("bearer"))
        .unwrap_or(token_header_value);
    String::from(token.trim())
}

/// Admin requests are authenticated either by the session cookie handed out on
/// login or by an `x-api-key` header containing the admin password
pub fn protect_admin_route(req: &HttpRequest, ctx: &TrackerContext) -> Result<(), TrackerError> {
    let admin_password = match &ctx.config.admin_password {
        Some(password) => password,
        None => {
            return Err(TrackerError::Unauthorized(
                "The admin api is not configured".into(),
            ))
        }
    };

    if let Some(session) = req.cookie(ADMIN_SESSION_COOKIE) {
        if secure_eq(session.value(), &ctx.config.admin_session_token) {
            return Ok(());
        }
    }
    if let Some(api_key) = get_header(req, "x-api-key") {
        if secure_eq(api_key, admin_password) {
            return Ok(());
        }
    }

    Err(TrackerError::Unauthorized(
        "Missing or invalid admin credentials".into(),
    ))
}

/// The external scheduler authenticates with the shared secret in either the
/// `x-cron-secret` header or as a bearer token
pub fn protect_cron_route(req: &HttpRequest, ctx: &TrackerContext) -> Result<(), TrackerError> {
    let cron_secret = match &ctx.config.cron_secret {
        Some(secret) => secret,
        None => {
            return Err(TrackerError::Unauthorized(
                "The scheduler secret is not configured".into(),
            ))
        }
    };

    let provided = get_header(req, "x-cron-secret")
        .map(String::from)
        .or_else(|| get_header(req, "authorization").map(parse_authtoken_header));
    match provided {
        Some(secret) if secure_eq(&secret, cron_secret) => Ok(()),
        _ => Err(TrackerError::Unauthorized(
            "Missing or invalid scheduler secret".into(),
        )),
    }
}
