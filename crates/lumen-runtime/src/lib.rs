//! LUMEN Runtime - Process-level wiring for the instrumentation core
//!
//! - Configuration loaded from JSON with defaults for every field
//! - One-shot structured logging setup (plain or JSON, env filter)
//! - A recorder that logs measurements against the active tag map

pub mod config;
pub mod logging;
pub mod recorder;

pub use config::*;
pub use logging::*;
pub use recorder::*;
