//! User service implementation
//!
//! Caches the names of users seen in chat so rosters can be rendered later.

use std::sync::Arc;
use tracing::{debug, warn};
use crate::database::Store;
use crate::models::{IncomingMessage, User};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Cache the sender and any forwarded-from user of a message.
    /// Failures are logged and otherwise ignored.
    pub async fn remember(&self, message: &IncomingMessage) {
        let users = std::iter::once(&message.sender).chain(message.forwarded_from.as_ref());
        for user in users {
            if let Err(e) = self.store.save_user(user).await {
                warn!(user_id = user.id, error = %e, "Failed to cache user");
            }
        }
    }

    /// Load a user for display, falling back to a placeholder
    pub async fn get_user_or_placeholder(&self, user_id: i64) -> User {
        match self.store.load_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(user_id = user_id, "Unknown user, using placeholder");
                User::placeholder(user_id)
            }
            Err(e) => {
                warn!(user_id = user_id, error = %e, "Failed to load user, using placeholder");
                User::placeholder(user_id)
            }
        }
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
