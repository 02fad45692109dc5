mod find_due_reminders;
pub mod regenerate_reminders;
mod send_due_reminders;

use actix_web::web;
use send_due_reminders::send_due_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/cron/send-reminders",
        web::get().to(send_due_reminders_controller),
    );
    cfg.route(
        "/cron/send-reminders",
        web::post().to(send_due_reminders_controller),
    );
}
