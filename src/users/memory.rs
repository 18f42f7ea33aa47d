//! In-memory user storage for development and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::users::repo::{RepoError, UserRepository};
use crate::users::repo_types::User;

struct Table {
    rows: BTreeMap<i32, User>,
    next_id: i32,
}

pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    fn email_taken(&self, email: &str, id: i32) -> bool {
        self.rows.values().any(|u| u.email == email && u.id != id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let mut table = self.table.write().await;

        // Mirrors the UNIQUE (email) constraint of the SQL schema.
        if table.email_taken(&user.email, user.id) {
            return Err(RepoError::DuplicateEmail(user.email));
        }

        if user.is_persisted() {
            if !table.rows.contains_key(&user.id) {
                return Err(RepoError::Missing(user.id));
            }
        } else {
            let id = table.next_id;
            table.next_id = id.checked_add(1).ok_or(RepoError::IdsExhausted)?;
            user.id = id;
        }

        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_email_excluding_id(
        &self,
        email: &str,
        id: i32,
    ) -> Result<bool, RepoError> {
        Ok(self.table.read().await.email_taken(email, id))
    }
}
