use super::renew_customer::{RenewCustomerUseCase, UseCaseResponse};
use crate::shared::usecase::Subscriber;
use renewal_tracker_domain::NewSendLog;
use renewal_tracker_infra::TrackerContext;
use tracing::error;

pub struct WriteRenewalLogOnCustomerRenewed;

#[async_trait::async_trait(?Send)]
impl Subscriber<RenewCustomerUseCase> for WriteRenewalLogOnCustomerRenewed {
    async fn notify(&self, e: &UseCaseResponse, ctx: &TrackerContext) {
        let log = NewSendLog::renewed(e.customer.id, e.renewed_ts);
        // Sideeffect, the renewal itself already succeeded
        if let Err(err) = ctx.repos.send_logs.insert(&log).await {
            error!(
                "Unable to write renewal log for customer: {}. Error: {:?}",
                e.customer.id, err
            );
        }
    }
}
