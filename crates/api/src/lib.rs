mod admin;
mod customer;
mod error;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use error::TrackerError;
use renewal_tracker_infra::TrackerContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    admin::configure_routes(cfg);
    customer::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

/// Malformed bodies, paths and query strings are reported the same way as
/// every other invalid input
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        TrackerError::BadClientData(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        TrackerError::BadClientData(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        TrackerError::BadClientData(err.to_string()).into()
    }));
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: TrackerContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: TrackerContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let ctx = web::Data::new(context);
        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(ctx.clone())
                .service(
                    web::scope("/api/v1")
                        .configure(configure_extractors)
                        .configure(configure_server_api),
                )
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
