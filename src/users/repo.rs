use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::users::repo_types::User;

#[derive(Debug, Error)]
pub enum RepoError {
    /// The unique constraint on `email` rejected the write.
    #[error("email already stored: {0}")]
    DuplicateEmail(String),
    #[error("user {0} does not exist")]
    Missing(i32),
    #[error("no user ids left to assign")]
    IdsExhausted,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence operations the user service needs.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;
    /// Inserts when `user.id` is unset, otherwise replaces the row with that id.
    async fn save(&self, user: User) -> Result<User, RepoError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError>;
    /// True iff some row other than `id` already holds `email`.
    async fn exists_by_email_excluding_id(&self, email: &str, id: i32)
        -> Result<bool, RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn classify(err: sqlx::Error, email: &str) -> RepoError {
    let unique = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if unique {
        RepoError::DuplicateEmail(email.to_string())
    } else {
        RepoError::Database(err)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        if !user.is_persisted() {
            let created = sqlx::query_as::<_, User>(
                r#"
                INSERT INTO users (name, email, password)
                VALUES ($1, $2, $3)
                RETURNING id, name, email, password
                "#,
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&self.db)
            .await
            .map_err(|e| classify(e, &user.email))?;
            debug!(user_id = created.id, "user row inserted");
            return Ok(created);
        }

        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name = $2, email = $3, password = $4
             WHERE id = $1
            RETURNING id, name, email, password
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| classify(e, &user.email))?
        .ok_or(RepoError::Missing(user.id))?;
        debug!(user_id = updated.id, "user row replaced");
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn exists_by_email_excluding_id(
        &self,
        email: &str,
        id: i32,
    ) -> Result<bool, RepoError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND id <> $2)"#,
        )
        .bind(email)
        .bind(id)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }
}

// These need a live Postgres: `DATABASE_URL=... cargo test -- --ignored`.
#[cfg(test)]
mod pg_tests {
    use super::*;
    use crate::users::repo_types::UNSET_ID;

    fn user(id: i32, email: &str) -> User {
        User {
            id,
            name: "Valdir".into(),
            email: email.into(),
            password: "hash".into(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore]
    async fn unique_constraint_surfaces_as_duplicate_email(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let first = repo.save(user(UNSET_ID, "valdir@email.com")).await.unwrap();
        assert!(first.is_persisted());

        let err = repo.save(user(UNSET_ID, "valdir@email.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::DuplicateEmail(e) if e == "valdir@email.com"));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore]
    async fn update_of_missing_row_is_reported(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let err = repo.save(user(404, "ghost@email.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::Missing(404)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore]
    async fn email_check_excludes_own_row(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let saved = repo.save(user(UNSET_ID, "valdir@email.com")).await.unwrap();
        assert!(!repo
            .exists_by_email_excluding_id("valdir@email.com", saved.id)
            .await
            .unwrap());
        assert!(repo
            .exists_by_email_excluding_id("valdir@email.com", UNSET_ID)
            .await
            .unwrap());
    }
}
