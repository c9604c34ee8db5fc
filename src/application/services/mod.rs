//! Application services orchestrating domain operations.

pub mod link_service;
pub mod token_service;
pub mod user_service;

pub use link_service::LinkService;
pub use token_service::{Claims, TokenError, TokenService};
pub use user_service::UserService;
