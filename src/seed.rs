use tracing::{info, warn};

use crate::users::{dto::UserRequest, error::UserError, UserService};

fn demo_users() -> Vec<UserRequest> {
    [("Valdir", "valdir@email.com"), ("Luiz", "luiz@email.com")]
        .into_iter()
        .map(|(name, email)| UserRequest {
            name: name.into(),
            email: email.into(),
            password: "123".into(),
        })
        .collect()
}

/// Inserts the development demo users. Rows whose email already exists are
/// skipped, so running it on every start is harmless.
pub async fn seed_demo_users(users: &UserService) -> anyhow::Result<usize> {
    let mut inserted = 0;
    for req in demo_users() {
        let email = req.email.clone();
        match users.create(req).await {
            Ok(user) => {
                info!(user_id = user.id, %email, "seeded demo user");
                inserted += 1;
            }
            Err(UserError::Conflict { .. }) => {
                warn!(%email, "demo user already present; skipping");
            }
            Err(e) => return Err(anyhow::Error::new(e).context("seed demo users")),
        }
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::memory::InMemoryUserRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let users = UserService::new(Arc::new(InMemoryUserRepository::new()));

        assert_eq!(seed_demo_users(&users).await.unwrap(), 2);
        assert_eq!(seed_demo_users(&users).await.unwrap(), 0);

        let all = users.find_all().await.unwrap();
        let emails: Vec<_> = all.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["valdir@email.com", "luiz@email.com"]);
    }
}
