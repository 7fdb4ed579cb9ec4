use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use anyhow::{bail, Result};

/// Registration input: everything a user record needs except the
/// store-assigned creation timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub organization: String,
    pub phone: String,
    pub role: String,
    pub email_verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub organization: String,
    pub phone: String,
    pub role: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// The on-disk account collection, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDirectory {
    pub version: u32,
    #[serde(default)]
    pub users: HashMap<String, UserRecord>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    /// Create a new empty directory with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            users: HashMap::new(),
        }
    }

    /// Look up a user by email
    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users.get(email)
    }

    /// Register a new user, stamping the creation time.
    /// Fails on a duplicate email or obviously malformed input.
    pub fn register(&mut self, new_user: NewUser) -> Result<()> {
        if new_user.user_id.is_empty() {
            bail!("user_id must not be empty");
        }
        if !new_user.email.contains('@') {
            bail!("invalid email: {}", new_user.email);
        }
        if self.users.contains_key(&new_user.email) {
            bail!("account already exists for {}", new_user.email);
        }

        let record = UserRecord {
            user_id: new_user.user_id,
            email: new_user.email.clone(),
            password: new_user.password,
            full_name: new_user.full_name,
            organization: new_user.organization,
            phone: new_user.phone,
            role: new_user.role,
            email_verified: new_user.email_verified,
            created_at: Utc::now(),
        };
        self.users.insert(new_user.email, record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> NewUser {
        NewUser {
            user_id: "user_001".to_string(),
            email: "someone@example.org".to_string(),
            password: "Secret123!".to_string(),
            full_name: "Some One".to_string(),
            organization: "Example Org".to_string(),
            phone: "+1 555 0100".to_string(),
            role: "user".to_string(),
            email_verified: true,
        }
    }

    #[test]
    fn test_new_directory_empty() {
        let directory = UserDirectory::new();
        assert_eq!(directory.version, 1);
        assert!(directory.users.is_empty());
    }

    #[test]
    fn test_register_and_find() {
        let mut directory = UserDirectory::new();
        directory.register(sample_user()).unwrap();

        let found = directory.find_by_email("someone@example.org").unwrap();
        assert_eq!(found.user_id, "user_001");
        assert_eq!(found.role, "user");
        assert!(found.email_verified);
    }

    #[test]
    fn test_find_missing_is_none() {
        let directory = UserDirectory::new();
        assert!(directory.find_by_email("nobody@example.org").is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut directory = UserDirectory::new();
        directory.register(sample_user()).unwrap();

        let result = directory.register(sample_user());
        assert!(result.is_err());
        assert_eq!(directory.users.len(), 1);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut directory = UserDirectory::new();
        let mut user = sample_user();
        user.email = "not-an-email".to_string();
        assert!(directory.register(user).is_err());
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let mut directory = UserDirectory::new();
        let mut user = sample_user();
        user.user_id = String::new();
        assert!(directory.register(user).is_err());
    }
}
