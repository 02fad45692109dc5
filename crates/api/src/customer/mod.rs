use actix_web::web;

mod create_customer;
mod delete_customer;
mod get_customer;
mod get_customer_logs;
mod get_customers;
mod import_customers;
mod import_customers_csv;
mod renew_customer;
mod set_customer_paused;
mod subscribers;
mod update_customer;

use create_customer::create_customer_controller;
use delete_customer::delete_customer_controller;
use get_customer::get_customer_controller;
use get_customer_logs::get_customer_logs_controller;
use get_customers::get_customers_controller;
use import_customers::import_customers_controller;
use import_customers_csv::import_customers_csv_controller;
use renew_customer::renew_customer_controller;
use set_customer_paused::set_customer_paused_controller;
use update_customer::update_customer_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/customers", web::get().to(get_customers_controller));
    cfg.route("/customers", web::post().to(create_customer_controller));

    // Registered before the `{customer_id}` routes so they are matched first
    cfg.route(
        "/customers/import",
        web::post().to(import_customers_controller),
    );
    cfg.route(
        "/customers/import/csv",
        web::post().to(import_customers_csv_controller),
    );

    cfg.route(
        "/customers/{customer_id}",
        web::get().to(get_customer_controller),
    );
    cfg.route(
        "/customers/{customer_id}",
        web::put().to(update_customer_controller),
    );
    cfg.route(
        "/customers/{customer_id}",
        web::delete().to(delete_customer_controller),
    );

    cfg.route(
        "/customers/{customer_id}/pause",
        web::post().to(set_customer_paused_controller),
    );
    cfg.route(
        "/customers/{customer_id}/renew",
        web::post().to(renew_customer_controller),
    );
    cfg.route(
        "/customers/{customer_id}/logs",
        web::get().to(get_customer_logs_controller),
    );
}
