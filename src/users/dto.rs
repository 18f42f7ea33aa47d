use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Body of `POST /user` and `PUT /user/{id}`.
///
/// Any `id` sent by the client is ignored: ids come from storage on create
/// and from the path on update.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Outbound representation of a user. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

impl UserRequest {
    /// Builds the entity to persist. `password` must already be hashed.
    pub fn into_user(self, id: i32, password: String) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password,
        }
    }

    /// Checks the fields are usable. Values are stored exactly as sent.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_valid_email(&self.email) {
            return Err("Invalid email");
        }
        if self.name.trim().is_empty() {
            return Err("Name must not be empty");
        }
        if self.password.is_empty() {
            return Err("Password must not be empty");
        }
        Ok(())
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}
