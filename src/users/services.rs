use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::users::{
    dto::UserRequest,
    error::UserError,
    password::hash_password_blocking,
    repo::UserRepository,
    repo_types::{User, UNSET_ID},
};

/// Business rules for user management. Depends only on the repository port.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<User, UserError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound { id })
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<User>, UserError> {
        let users = self.repo.find_all().await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn create(&self, req: UserRequest) -> Result<User, UserError> {
        self.ensure_email_free(&req.email, UNSET_ID).await?;

        let hash = hash_password_blocking(req.password.clone())
            .await
            .map_err(UserError::Hashing)?;
        let user = self.repo.save(req.into_user(UNSET_ID, hash)).await?;

        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    /// Full replacement of name, email and password for `id`.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn update(&self, id: i32, req: UserRequest) -> Result<User, UserError> {
        self.find_by_id(id).await?;
        self.ensure_email_free(&req.email, id).await?;

        let hash = hash_password_blocking(req.password.clone())
            .await
            .map_err(UserError::Hashing)?;
        let user = self.repo.save(req.into_user(id, hash)).await?;

        info!(user_id = user.id, "user updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), UserError> {
        self.find_by_id(id).await?;
        self.repo.delete_by_id(id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, id: i32) -> Result<(), UserError> {
        if self.repo.exists_by_email_excluding_id(email, id).await? {
            warn!(%email, "email already registered");
            return Err(UserError::Conflict {
                email: email.to_string(),
            });
        }
        Ok(())
    }
}
