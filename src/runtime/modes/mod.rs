//! Mode routing
//!
//! The HTTP server is the default mode; the remaining subcommands are
//! one-shot maintenance tasks handled by [`crate::cli`].

pub mod server;

pub use server::{configure_app, run_server};
