//! State management module
//!
//! In-memory dialog state for group setup

pub mod conversation;
pub mod expiring;
pub mod setup;

// Re-export commonly used state components
pub use conversation::{ConversationManager, ConversationTracker, PendingDialog};
pub use expiring::ExpiringMap;
pub use setup::{SetupAnswer, SetupState, SetupStep};
