//! User read model and account creation payload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use zeroize::Zeroizing;

use super::identifiers::UserId;

/// Account role governing access scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full administrative access.
    SuperAdmin,
    /// Manages projects and their buildings.
    ProjectManager,
    /// Field agent contacting owners.
    Agent,
    /// Resident with access to their own records.
    Tenant,
}

impl Role {
    /// Wire representation, also used as the `role` query value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::ProjectManager => "PROJECT_MANAGER",
            Self::Agent => "AGENT",
            Self::Tenant => "TENANT",
        }
    }

    /// Whether accounts with this role may be created through the API.
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::ProjectManager | Self::Agent)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "PROJECT_MANAGER" => Ok(Self::ProjectManager),
            "AGENT" => Ok(Self::Agent),
            "TENANT" => Ok(Self::Tenant),
            _ => Err(UnknownRoleError(value.to_owned())),
        }
    }
}

/// A user account, as returned by the users endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub user_id: UserId,
    /// Login e-mail address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Access role.
    pub role: Role,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Contact phone number, when recorded.
    pub phone: Option<String>,
}

/// Validation errors for [`NewUser`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewUserError {
    /// E-mail was blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Full name was blank.
    #[error("full name must not be empty")]
    EmptyFullName,
    /// The role cannot be assigned through account creation.
    #[error("role {0} cannot be assigned to new accounts")]
    RoleNotAssignable(Role),
}

/// Payload for creating a user account.
///
/// The password is wiped from memory on drop and never appears in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    email: String,
    #[serde(serialize_with = "serialize_password")]
    password: Zeroizing<String>,
    full_name: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

fn serialize_password<S: Serializer>(
    password: &Zeroizing<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.as_str())
}

impl NewUser {
    /// Validate the account fields.
    ///
    /// E-mail and full name are trimmed; the password keeps caller-provided
    /// whitespace. Only `PROJECT_MANAGER` and `AGENT` accounts can be created.
    pub fn try_new(
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<Self, NewUserError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(NewUserError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(NewUserError::EmptyPassword);
        }
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(NewUserError::EmptyFullName);
        }
        if !role.is_assignable() {
            return Err(NewUserError::RoleNotAssignable(role));
        }

        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            full_name: full_name.to_owned(),
            role,
            phone: None,
        })
    }

    /// Attach a contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Login e-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Display name.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Requested role.
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("phone", &self.phone)
            .finish()
    }
}
