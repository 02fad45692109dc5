use serde::{Deserialize, Serialize};

pub mod send_due_reminders {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub dry_run: Option<bool>,
    }

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Number of due `Reminder`s found
        pub due: usize,
        pub sent: usize,
        pub failed: usize,
        pub dry_run: bool,
    }
}
