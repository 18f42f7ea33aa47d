use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Id carried by a user that storage has not assigned yet.
pub const UNSET_ID: i32 = 0;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String, // Argon2 hash, not exposed in JSON
}

impl User {
    pub fn is_persisted(&self) -> bool {
        self.id != UNSET_ID
    }
}
