use chrono::NaiveDate;
use std::fmt::Display;

use crate::{errors::ConversionError, id::DbId};

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
/// Represents a username and is constrained to not be an empty string
pub struct Username(String);

/// Role of an account, decides which parts of the dashboard are available
#[derive(
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Warden,
    Admin,
}

/// The identity of the logged in user as returned by `users/me/`
///
/// Treated as a snapshot, a new fetch replaces it wholesale
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: DbId,
    pub username: Username,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// The account as echoed back by `register/`
///
/// Registration does not return an id, [`UserRecord`] is only available once
/// the new account logs in
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub username: Username,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub role: Role,
}

impl UserRecord {
    /// Name to show in the UI, falls back to the username if the API did not
    /// provide a full name
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            self.username.as_ref()
        } else {
            &self.full_name
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Warden | Role::Admin)
    }
}

impl Username {
    /// Matches the limit on the API's user model
    pub const MAX_LENGTH: usize = 150;
}

impl TryFrom<String> for Username {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Username {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
