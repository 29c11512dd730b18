//! User sign-up payloads.
//!
//! [`UserIn`] is what clients send; [`BaseUser`] is what they get back. The
//! conversion is the only way to build a response, so a password cannot leak
//! into one.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationResult;
use crate::validate::{Rules, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"username": "Name", "full_name": "Full Name"}))]
pub struct BaseUser {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UserIn {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub password: String,
}

impl core::fmt::Debug for UserIn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserIn")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("password", &"***")
            .finish()
    }
}

impl Validate for UserIn {
    fn validate(&self) -> ValidationResult<()> {
        Rules::new()
            .min_length("username", &self.username, 1)
            .finish()
    }
}

impl From<UserIn> for BaseUser {
    fn from(value: UserIn) -> Self {
        Self {
            username: value.username,
            full_name: value.full_name,
        }
    }
}
