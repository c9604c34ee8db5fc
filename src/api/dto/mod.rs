//! Request and response DTOs for the REST API.

pub mod shorten;
pub mod users;
