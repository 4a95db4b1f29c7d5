//! Business logic shared by the HTTP handlers and the CLI

mod auth_service;
mod click;
mod link_service;

pub use auth_service::{AuthService, Principal};
pub use click::{ClickRecorder, ClickSink};
pub use link_service::{
    CreateLinkRequest, GENERATED_INSERT_ATTEMPTS, LinkService, RESERVED_CODES, UpdateLinkRequest,
};
