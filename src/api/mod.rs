//! HTTP surface: redirect, admin JSON API, health

pub mod constants;
pub mod middleware;
pub mod services;
pub mod session;
