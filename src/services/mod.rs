//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod notification;
pub mod schedule;
pub mod user;

// Re-export commonly used services
pub use event::EventService;
pub use notification::{Messenger, OutgoingMessage, ReplyMarkupKind, TelegramMessenger};
pub use user::UserService;

use std::sync::Arc;
use crate::config::Settings;
use crate::database::Store;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub event_service: EventService,
}

impl ServiceFactory {
    /// Create all services over one store
    pub fn new(store: Arc<dyn Store>, settings: &Settings) -> Self {
        Self {
            user_service: UserService::new(Arc::clone(&store)),
            event_service: EventService::new(store, &settings.events),
        }
    }
}
