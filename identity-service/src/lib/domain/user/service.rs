use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Authentication engine implementation.
///
/// Orchestrates signup and login over the repository port and the credential
/// hasher. Hashing and verification run on the blocking pool so concurrent
/// requests never queue behind each other's key derivation.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: auth::PasswordHasher,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create a new authentication engine with an injected repository.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    ///
    /// # Returns
    /// Configured engine instance
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::warn!(
                email = %command.email.as_str(),
                "Signup rejected: email already registered"
            );
            return Err(AuthError::UserAlreadyExists);
        }

        let hasher = self.password_hasher;
        let password = command.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|e| AuthError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        // the unique index still backstops this insert; a racing duplicate
        // arrives as RepositoryError::DuplicateEmail and converts to
        // UserAlreadyExists
        let user = self
            .repository
            .insert(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
                role: command.role,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            email = %user.email.as_str(),
            role = %user.role,
            "User signed up"
        );

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<User, AuthError> {
        let user = match self.repository.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(
                    email = %credentials.email.as_str(),
                    "Login failed: unknown email"
                );
                return Err(AuthError::InvalidCredentials);
            }
        };

        let hasher = self.password_hasher;
        let password = credentials.password;
        let stored_hash = user.password_hash.clone();
        let password_matches =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
                .await
                .map_err(|e| AuthError::Unknown(format!("Verification task failed: {}", e)))?
                .map_err(|e| AuthError::Hashing(e.to_string()))?;

        if !password_matches {
            tracing::warn!(
                email = %user.email.as_str(),
                "Login failed: wrong password"
            );
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(
            user_id = %user.id,
            email = %user.email.as_str(),
            "User logged in"
        );

        Ok(user)
    }
}
