mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    CustomerSearchQuery, DeleteResult, ICustomerRepo, IReminderRepo, ISendLogRepo, Repos,
    SearchResult, UpsertResult,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct TrackerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl TrackerContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let credentials = config.gmail.clone().expect(
            "GMAIL_CLIENT_ID, GMAIL_CLIENT_SECRET and GMAIL_REFRESH_TOKEN env vars to be present.",
        );
        let from = config
            .mail_from
            .clone()
            .expect("MAIL_FROM env var to be present when sending through Gmail.");
        let mailer = GmailMailer::new(credentials, &from)
            .expect("MAIL_FROM to be a valid mailbox and the Gmail http client to be created");
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(mailer),
        }
    }

    /// Context with inmemory repositories and an inmemory mailer
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(InMemoryMailer::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> TrackerContext {
    TrackerContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
