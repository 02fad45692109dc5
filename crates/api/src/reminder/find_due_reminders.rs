use renewal_tracker_domain::{Customer, Reminder};
use renewal_tracker_infra::TrackerContext;
use std::collections::HashMap;

/// Pending `Reminder`s scheduled at or before `now` together with their
/// `Customer`, skipping `Customer`s that are paused. Ordered by scheduled time.
pub async fn find_due_reminders(
    now: i64,
    ctx: &TrackerContext,
) -> anyhow::Result<Vec<(Reminder, Customer)>> {
    let reminders = ctx.repos.reminders.find_pending_before(now).await?;
    if reminders.is_empty() {
        return Ok(Vec::new());
    }

    let mut customer_ids = reminders.iter().map(|r| r.customer_id).collect::<Vec<_>>();
    customer_ids.sort();
    customer_ids.dedup();
    let customers = ctx
        .repos
        .customers
        .find_many(&customer_ids)
        .await?
        .into_iter()
        .filter(|customer| !customer.paused)
        .map(|customer| (customer.id, customer))
        .collect::<HashMap<_, _>>();

    Ok(reminders
        .into_iter()
        .filter(|reminder| reminder.is_due(now))
        .filter_map(|reminder| {
            customers
                .get(&reminder.customer_id)
                .cloned()
                .map(|customer| (reminder, customer))
        })
        .collect())
}
