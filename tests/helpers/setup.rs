use renewal_tracker_api::Application;
use renewal_tracker_infra::{Config, InMemoryMailer, TrackerContext};
use renewal_tracker_sdk::RenewalTrackerSDK;
use std::sync::Arc;

pub const ADMIN_PASSWORD: &str = "admin-password";
pub const CRON_SECRET: &str = "cron-secret";

pub struct TestApp {
    pub config: Config,
    pub address: String,
    pub mailer: Arc<InMemoryMailer>,
}

impl TestApp {
    pub fn scheduler(&self) -> RenewalTrackerSDK {
        RenewalTrackerSDK::new_scheduler(self.address.clone(), CRON_SECRET)
    }

    pub fn anonymous(&self) -> RenewalTrackerSDK {
        RenewalTrackerSDK::new_anonymous(self.address.clone())
    }
}

// Launch the application with in-memory storage as a background task
pub async fn spawn_app() -> (TestApp, RenewalTrackerSDK) {
    let mut ctx = TrackerContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.admin_password = Some(ADMIN_PASSWORD.into());
    ctx.config.cron_secret = Some(CRON_SECRET.into());
    ctx.config.reminder_offsets = vec![-30, -7, -3, -1, 1];
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.mailer = mailer.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        address: address.clone(),
        mailer,
    };
    let sdk = RenewalTrackerSDK::new(address, ADMIN_PASSWORD);
    (app, sdk)
}
