//! Test helpers module
//!
//! A bot wired to an in-memory store and a messenger that records what it
//! would have sent.

#![allow(dead_code)]

pub mod database_helper;
pub mod recording_messenger;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use recording_messenger::*;
pub use test_context::*;
pub use test_data::*;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
