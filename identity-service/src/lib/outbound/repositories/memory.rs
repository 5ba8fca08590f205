use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::RepositoryError;

/// In-memory user store with the same observable contract as the Postgres
/// adapter: email uniqueness among non-deleted rows, soft-delete filtering,
/// datastore-assigned ids and timestamps.
///
/// Backs the integration suite, which runs without a database.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    users: HashMap<i64, User>,
    last_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Soft-delete the non-deleted user holding this email.
    ///
    /// Stands in for the service's (out-of-scope) account remover so the
    /// deletion semantics stay observable from tests. Returns whether a
    /// user was deleted.
    pub fn soft_delete(&self, email: &str) -> bool {
        let mut state = self.lock();

        match state
            .users
            .values_mut()
            .find(|user| user.deleted_at.is_none() && user.email.as_str() == email)
        {
            Some(user) => {
                user.deleted_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        let state = self.lock();

        Ok(state
            .users
            .values()
            .find(|user| user.deleted_at.is_none() && user.email == *email)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        // check and insert under one lock, like the unique index makes the
        // database do
        let mut state = self.lock();

        let occupied = state
            .users
            .values()
            .any(|existing| existing.deleted_at.is_none() && existing.email == user.email);
        if occupied {
            return Err(RepositoryError::DuplicateEmail(
                user.email.as_str().to_string(),
            ));
        }

        state.last_id += 1;
        let now = Utc::now();
        let created = User {
            id: UserId(state.last_id),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        state.users.insert(created.id.0, created.clone());
        Ok(created)
    }
}
