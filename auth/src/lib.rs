//! Credential and session primitives
//!
//! Provides the two security-sensitive building blocks of the identity
//! service:
//! - Password hashing (Argon2id, per-hash random salt)
//! - Signed session tokens (JWT, HS256) with a fixed lifetime
//!
//! The service defines its own domain traits and wires these implementations
//! in at the edges. Nothing here knows about users, storage, or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &digest).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", 900);
//! let token = issuer.issue(42, "alice@example.com", "user").unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.id, 42);
//! assert_eq!(claims.exp - claims.iat, 900);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SessionClaims;
pub use token::TokenError;
pub use token::TokenIssuer;
