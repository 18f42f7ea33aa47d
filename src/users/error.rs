use thiserror::Error;

use crate::users::repo::RepoError;

/// Failures surfaced by the user service.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound { id: i32 },
    #[error("Email already registered")]
    Conflict { email: String },
    #[error("storage failure")]
    Storage(#[source] RepoError),
    #[error("password hashing failed")]
    Hashing(#[source] anyhow::Error),
}

impl From<RepoError> for UserError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::DuplicateEmail(email) => UserError::Conflict { email },
            RepoError::Missing(id) => UserError::NotFound { id },
            other => UserError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_public_contract() {
        assert_eq!(UserError::NotFound { id: 1 }.to_string(), "User not found");
        assert_eq!(
            UserError::Conflict { email: "a@b.c".into() }.to_string(),
            "Email already registered"
        );
    }

    #[test]
    fn storage_constraint_violations_become_typed_failures() {
        let conflict = UserError::from(RepoError::DuplicateEmail("a@b.c".into()));
        assert!(matches!(conflict, UserError::Conflict { email } if email == "a@b.c"));

        let missing = UserError::from(RepoError::Missing(7));
        assert!(matches!(missing, UserError::NotFound { id: 7 }));

        let other = UserError::from(RepoError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(other, UserError::Storage(_)));
    }
}
