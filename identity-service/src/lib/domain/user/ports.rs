use async_trait::async_trait;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::errors::RepositoryError;
use crate::user::models::EmailAddress;

/// Port for authentication engine operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with validated fields.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, password, and role
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UserAlreadyExists` - A non-deleted user already holds this email,
    ///   whether seen by the pre-check or surfaced by the insert itself
    /// * `Hashing` - Credential hashing failed internally
    /// * `Database` - Repository operation failed
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError>;

    /// Verify a credential pair against the stored account.
    ///
    /// # Arguments
    /// * `credentials` - Submitted email and raw password
    ///
    /// # Returns
    /// The authenticated user entity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password; the two are
    ///   deliberately indistinguishable
    /// * `Hashing` - Credential verification failed internally
    /// * `Database` - Repository operation failed
    async fn login(&self, credentials: Credentials) -> Result<User, AuthError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve the non-deleted user holding an email address.
    ///
    /// Soft-deleted rows are invisible to this lookup.
    ///
    /// # Arguments
    /// * `email` - Email address to search for
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;

    /// Persist a new user.
    ///
    /// Uniqueness among non-deleted users is enforced by the storage layer
    /// itself: a concurrent insert of the same email must surface as
    /// `DuplicateEmail`, never as silent success.
    ///
    /// # Arguments
    /// * `user` - Insert record (id and timestamps are datastore-assigned)
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered to a non-deleted user
    /// * `Database` - Database operation failed
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
}
