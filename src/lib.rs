//! shorturl - a small self-hosted URL shortener
//!
//! Maps short codes to target URLs, redirects visitors, counts clicks and
//! exposes an authenticated JSON API for managing links.
//!
//! # Architecture
//! - `storage`: SQLite persistence through SeaORM
//! - `services`: link and account logic shared by HTTP and CLI
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: command-line maintenance commands
//! - `config`: configuration loading
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
