//! Authentication primitives: login credentials, password changes, and the
//! identity carried by a bearer token.
//!
//! Inbound payload parsing stays outside the domain; handlers call these
//! constructors to validate raw strings before talking to a port.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{Email, Role, User, UserId};

/// Minimum accepted length, in characters, for a new password.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Validation failures for authentication payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was missing or blank.
    EmptyPassword,
    /// New password was shorter than [`PASSWORD_MIN_LEN`].
    PasswordTooShort { min: usize },
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email and password are required"),
            Self::EmptyPassword => write!(f, "email and password are required"),
            Self::PasswordTooShort { min } => {
                write!(f, "new password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lowercased, and non-empty.
/// - `password` is non-blank; surrounding whitespace is preserved so the
///   comparison against the stored hash is exact.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Example.com", "s3cret!").unwrap();
/// assert_eq!(creds.email().as_ref(), "admin@example.com");
/// assert_eq!(creds.password(), "s3cret!");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(|_| LoginValidationError::EmptyEmail)?;
        if password.trim().is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for account lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password exactly as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated password-change request.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    new: Zeroizing<String>,
}

impl PasswordChange {
    /// Validate a password change; the new password must be non-blank and at
    /// least [`PASSWORD_MIN_LEN`] characters long.
    pub fn try_from_parts(current: &str, new: &str) -> Result<Self, LoginValidationError> {
        if current.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        if new.trim().is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        if new.chars().count() < PASSWORD_MIN_LEN {
            return Err(LoginValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self {
            current: Zeroizing::new(current.to_owned()),
            new: Zeroizing::new(new.to_owned()),
        })
    }

    /// Password the caller claims is current.
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Replacement password.
    pub fn new_password(&self) -> &str {
        self.new.as_str()
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

/// Identity decoded from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Account identifier (`sub` claim).
    pub user_id: UserId,
    /// Email at the time the token was issued.
    pub email: Email,
    /// Role at the time the token was issued.
    pub role: Role,
}

impl AuthIdentity {
    /// Identity describing `user`.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id().clone(),
            email: user.email().clone(),
            role: user.role(),
        }
    }
}

/// Successful login result returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoginOutcome {
    /// Signed bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9...")]
    pub token: String,
    /// Authenticated user.
    pub user: User,
}
