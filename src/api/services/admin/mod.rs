//! Admin JSON API

pub mod auth;
pub mod error_code;
pub mod helpers;
pub mod link_crud;
pub mod routes;
pub mod types;

pub use error_code::ErrorCode;
pub use helpers::{error_response, success_response};
pub use types::{ApiResponse, LoginCredentials, PostNewLink, UpdateLinkBody, UserInfo};
