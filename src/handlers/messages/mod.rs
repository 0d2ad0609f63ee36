//! Message handlers module
//!
//! Handles plain messages that answer a pending dialog

pub mod group_setup;

pub use group_setup::{ask_for_configuration, continue_setup};
