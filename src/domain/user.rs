//! Directory user record and its API representation.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Single name/value attribute as stored by the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Read-only projection of a directory user. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub enabled: bool,
    pub status: String,
    pub attributes: Vec<UserAttribute>,
}

impl UserRecord {
    /// Attributes as a map; a repeated name keeps its last value.
    pub fn attribute_map(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect()
    }
}

/// User response returned by the lookup endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "00062716506")]
    pub username: String,
    pub enabled: bool,
    #[schema(example = "CONFIRMED")]
    pub user_status: String,
    pub user_attributes: BTreeMap<String, String>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        let user_attributes = user.attribute_map();
        Self {
            username: user.username,
            enabled: user.enabled,
            user_status: user.status,
            user_attributes,
        }
    }
}
