mod route_guards;

pub use route_guards::{protect_admin_route, protect_cron_route, secure_eq, ADMIN_SESSION_COOKIE};
