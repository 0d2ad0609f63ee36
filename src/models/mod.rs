//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod group;
pub mod event;
pub mod message;

// Re-export commonly used models
pub use user::User;
pub use group::Group;
pub use event::{Event, AttendeeId, AttendanceChange, ReduceOutcome, WithdrawOutcome};
pub use message::{ChatKind, IncomingMessage};
