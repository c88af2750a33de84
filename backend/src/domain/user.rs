//! User data model.
//!
//! A [`User`] is the public projection of an admin-panel account: it is what
//! login returns and what `GET /api/auth/me` serialises. The password hash
//! lives alongside it in [`UserAccount`] and never crosses an adapter
//! boundary towards clients.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user model constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The role name is not recognised.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login email address, normalised to trimmed lowercase.
///
/// Lookups and the default-admin comparison both go through this type so
/// `" Admin@Example.com "` and `"admin@example.com"` name the same account.
///
/// # Examples
/// ```
/// use backend::domain::Email;
///
/// let email = Email::new("  Admin@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "admin@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role. Only admins may mutate content; demo accounts can browse the
/// dashboard read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full editing rights.
    #[default]
    Admin,
    /// Read-only dashboard access.
    Demo,
}

impl Role {
    /// Whether this role may perform content mutations.
    #[must_use]
    pub fn can_edit(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Demo => "demo",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "demo" => Ok(Self::Demo),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Application user as seen by clients.
///
/// ## Invariants
/// - `id` is a UUID.
/// - `email` is trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "admin@healthspire.example")]
    email: Email,
    role: Role,
    #[serde(default)]
    #[schema(example = "/uploads/2f1c7d1e.png")]
    avatar: String,
}

impl User {
    /// Build a new [`User`] from validated components with an empty avatar.
    pub fn new(id: UserId, email: Email, role: Role) -> Self {
        Self {
            id,
            email,
            role,
            avatar: String::new(),
        }
    }

    /// Replace the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Account role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Avatar URL; empty when unset.
    pub fn avatar(&self) -> &str {
        self.avatar.as_str()
    }
}

/// Stored account: the public [`User`] plus its Argon2id PHC hash string.
#[derive(Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: String,
}

impl UserAccount {
    /// Pair a user with its password hash.
    pub fn new(user: User, password_hash: impl Into<String>) -> Self {
        Self {
            user,
            password_hash: password_hash.into(),
        }
    }

    /// Public user projection.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Consume the account, returning the public projection.
    pub fn into_user(self) -> User {
        self.user
    }

    /// PHC-formatted password hash.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Replace the stored hash after a password change.
    #[must_use]
    pub fn with_password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    /// Replace the avatar of the wrapped user.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.user = self.user.with_avatar(avatar);
        self
    }
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests;
