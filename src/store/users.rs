//! Seed user directory and the demo login token.
//!
//! Login is a plain email lookup, not an authentication boundary: no
//! password is ever checked and the token is opaque filler.

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Case-insensitive, whitespace-tolerant email lookup.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let needle = email.trim().to_lowercase();
        self.users.iter().find(|u| u.email == needle)
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }

    pub fn issue_token(&self, user: &User) -> String {
        format!("jwt_token_{}_{}", user.id, Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_lookup_normalizes_email() {
        let directory = UserDirectory::new(seed::users());
        let user = directory.find_by_email("  Admin@Nexus.com ").unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_unknown_email() {
        let directory = UserDirectory::new(seed::users());
        assert!(directory.find_by_email("nobody@nexus.com").is_none());
    }

    #[test]
    fn test_token_shape() {
        let directory = UserDirectory::new(seed::users());
        let user = directory.find_by_email("user@nexus.com").unwrap();
        assert!(directory.issue_token(user).starts_with("jwt_token_u2_"));
    }
}
