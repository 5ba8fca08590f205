use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::RoleError;

/// User aggregate entity.
///
/// Represents a registered account as stored. `password_hash` never leaves
/// the domain; response types project only the public fields.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// User unique identifier type, assigned by the datastore on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Ensures the name is 2-100 characters after trimming surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// # Arguments
    /// * `name` - Raw name string
    ///
    /// # Returns
    /// Validated PersonName value object
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 2 characters
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    /// Get the name as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format using an RFC 5322 compliant parser and caps length at
/// the storage column width. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    /// * `TooLong` - Email longer than 255 characters
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get the email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw signup password, validated against the registration policy.
///
/// Exists only long enough to be hashed. Debug output never reveals the
/// content.
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 128;

    /// Accept a raw password that satisfies the registration policy.
    ///
    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    /// * `TooLong` - Password longer than 128 characters
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let length = raw.chars().count();

        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(raw))
        }
    }

    /// Get the raw password for hashing.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Role tag carried by every user.
///
/// A closed set: the boundary rejects anything else, and an absent role on
/// signup defaults to `User`. The service itself makes no authorization
/// decisions with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Get the role as its wire/storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert record for the repository: everything the caller decides, nothing
/// the datastore assigns (id, timestamps).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: UserRole,
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct SignupCommand {
    pub name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
    pub role: UserRole,
}

impl SignupCommand {
    /// Construct a new signup command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Policy-checked raw password (hashed by the engine)
    /// * `role` - Requested role, already defaulted when absent
    pub fn new(name: PersonName, email: EmailAddress, password: Password, role: UserRole) -> Self {
        Self {
            name,
            email,
            password,
            role,
        }
    }
}

/// Transient login credential pair.
///
/// The raw password is deliberately unconstrained here: every submitted pair
/// must reach the same accept/reject decision, so no shape policy applies.
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl Credentials {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_bounds() {
        assert!(PersonName::new("Jo".to_string()).is_ok());
        assert!(matches!(
            PersonName::new("J".to_string()),
            Err(NameError::TooShort { .. })
        ));
        assert!(matches!(
            PersonName::new("x".repeat(101)),
            Err(NameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_person_name_length_in_characters() {
        // multi-byte characters count once, not per byte
        assert!(PersonName::new("Ré".to_string()).is_ok());
        assert!(matches!(
            PersonName::new("é".to_string()),
            Err(NameError::TooShort { .. })
        ));
        assert!(PersonName::new("é".repeat(100)).is_ok());
        assert!(matches!(
            PersonName::new("é".repeat(101)),
            Err(NameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_person_name_trims_whitespace() {
        let name = PersonName::new("  Ann  ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Ann");

        // whitespace alone does not satisfy the minimum
        assert!(matches!(
            PersonName::new("   ".to_string()),
            Err(NameError::TooShort { .. })
        ));
    }

    #[test]
    fn test_email_address_validation() {
        assert!(EmailAddress::new("ann@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));

        let oversized = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            EmailAddress::new(oversized),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_password_policy_bounds() {
        assert!(Password::new("secret".to_string()).is_ok());
        assert!(matches!(
            Password::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        assert!(matches!(
            Password::new("x".repeat(129)),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_password_length_in_characters() {
        // five characters in ten bytes is still too short
        assert!(matches!(
            Password::new("é".repeat(5)),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        assert!(Password::new("é".repeat(6)).is_ok());
        assert!(Password::new("é".repeat(128)).is_ok());
        assert!(matches!(
            Password::new("é".repeat(129)),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("super_secret".to_string()).unwrap();
        let rendered = format!("{:?}", password);

        assert!(!rendered.contains("super_secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new(
            EmailAddress::new("ann@example.com".to_string()).unwrap(),
            "super_secret".to_string(),
        );
        let rendered = format!("{:?}", credentials);

        assert!(rendered.contains("ann@example.com"));
        assert!(!rendered.contains("super_secret"));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::from_str("user").unwrap(), UserRole::User);
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert!(matches!(
            UserRole::from_str("superuser"),
            Err(RoleError::Unknown(_))
        ));
        // parsing is exact, not case-folded
        assert!(UserRole::from_str("Admin").is_err());
    }

    #[test]
    fn test_role_default_is_user() {
        assert_eq!(UserRole::default(), UserRole::User);
        assert_eq!(UserRole::default().as_str(), "user");
    }
}
