//! Application lifecycle
//!
//! - `lifetime`: startup wiring and shutdown signals
//! - `modes`: entry points for each execution mode

pub mod lifetime;
pub mod modes;
