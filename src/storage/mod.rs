pub mod backend;
pub mod models;

pub use backend::{LinkStore, RetryConfig, UserStore, connect_database};
pub use models::{Link, User};
