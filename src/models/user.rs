//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A chat participant as last seen in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl User {
    /// Best-effort record for a user that could not be loaded
    pub fn placeholder(id: i64) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: None,
            username: None,
        }
    }

    /// Name used when addressing the user in chat
    pub fn display_name(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return username.to_string();
        }

        let full_name = match self.last_name.as_deref().filter(|l| !l.is_empty()) {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        };

        if full_name.trim().is_empty() {
            format!("user {}", self.id)
        } else {
            full_name
        }
    }
}

impl From<&teloxide::types::User> for User {
    fn from(user: &teloxide::types::User) -> Self {
        Self {
            id: user.id.0 as i64,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: Option<&str>, username: Option<&str>) -> User {
        User {
            id: 42,
            first_name: first.to_string(),
            last_name: last.map(str::to_string),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(user("Shannon", Some("W"), Some("shan")).display_name(), "shan");
    }

    #[test]
    fn test_display_name_full_name() {
        assert_eq!(user("Shannon", Some("W"), None).display_name(), "Shannon W");
        assert_eq!(user("Shannon", None, None).display_name(), "Shannon");
    }

    #[test]
    fn test_placeholder_display_name() {
        assert_eq!(User::placeholder(7).display_name(), "user 7");
    }
}
