use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSessionResponse {
    pub ok: bool,
}

pub mod admin_login {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub password: String,
    }

    pub type APIResponse = AdminSessionResponse;
}

pub mod admin_logout {
    use super::*;

    pub type APIResponse = AdminSessionResponse;
}
