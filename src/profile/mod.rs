//! Profile records describing a simulated server identity, plus the rules
//! that decide whether a record may be persisted.

pub mod validation;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use validation::{
    is_valid_profile_name, validate, validate_field, validate_users, ValidationError,
};

/// Profile name used when the operator leaves the name blank.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Supported profile flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileType {
    Classic,
    Ia,
}

impl ProfileType {
    pub const ALL: [ProfileType; 2] = [ProfileType::Classic, ProfileType::Ia];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Classic => "classic",
            ProfileType::Ia => "ia",
        }
    }

    pub fn options() -> Vec<String> {
        Self::ALL.iter().map(|kind| kind.as_str().to_string()).collect()
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "classic" => Ok(ProfileType::Classic),
            "ia" => Ok(ProfileType::Ia),
            other => Err(format!("unknown profile type `{other}`")),
        }
    }
}

/// The record assembled by the wizard and persisted by the profile store.
///
/// `profile_type` stays a plain string so that records written by hand (or by
/// older tooling) still load and can be reported by [`validate`] instead of
/// failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(rename = "type", default)]
    pub profile_type: String,
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub profile_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

impl ProfileDraft {
    pub fn new(
        profile_type: ProfileType,
        server_name: impl Into<String>,
        profile_name: impl Into<String>,
    ) -> Self {
        Self {
            profile_type: profile_type.as_str().to_string(),
            server_name: server_name.into(),
            profile_name: profile_name.into(),
            ..Self::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Parsed profile type, if the stored string is one of the known values.
    pub fn kind(&self) -> Option<ProfileType> {
        self.profile_type.parse().ok()
    }

    /// Cleans every user entry and drops the ones left empty.
    pub fn sanitize_users(&mut self) {
        self.users = sanitize_users(&self.users);
    }
}

/// Trims an entry and strips control characters (including NUL and DEL).
pub fn sanitize_entry(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn sanitize_users(users: &[String]) -> Vec<String> {
    users
        .iter()
        .map(|user| sanitize_entry(user))
        .filter(|user| !user.is_empty())
        .collect()
}

// Legacy records occasionally carry `"users": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
