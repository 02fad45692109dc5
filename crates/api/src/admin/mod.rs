use actix_web::web;

mod admin_login;
mod admin_logout;

use admin_login::admin_login_controller;
use admin_logout::admin_logout_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/auth", web::post().to(admin_login_controller));
    cfg.route("/admin/logout", web::post().to(admin_logout_controller));
}
