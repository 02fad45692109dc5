mod admin;
mod customer;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::customer::dtos::*;
}

pub use crate::admin::api::*;
pub use crate::customer::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
