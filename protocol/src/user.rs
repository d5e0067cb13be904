//! Authenticated user snapshot as issued by the backend at login.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Role attached to a user account.
///
/// Roles the client does not know are kept verbatim so a newer backend never
/// breaks session decoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    SuperAdmin,
    Admin,
    Staff,
    Teacher,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Teacher => "teacher",
            Self::Other(raw) => raw,
        }
    }

    /// Human label, e.g. `super admin`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "super_admin" => Self::SuperAdmin,
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            "teacher" => Self::Teacher,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Immutable profile snapshot. Replaced wholesale on each login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    /// Kept as sent: plain `"module.action"` strings or
    /// `{ module, actions }` objects.
    #[serde(default, deserialize_with = "permissions_or_empty")]
    pub permissions: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PersonName>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: None,
            role,
            permissions: Vec::new(),
            profile: None,
        }
    }

    /// `First Last` when the backend sent a profile, the username otherwise.
    pub fn display_name(&self) -> String {
        let full = self
            .profile
            .as_ref()
            .map(|name| format!("{} {}", name.first_name, name.last_name))
            .unwrap_or_default();
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// Matches `"module.action"` against string grants and against
    /// `{ module, actions }` grants. A bare `"module"` matches a module grant
    /// with any actions.
    pub fn has_permission(&self, permission: &str) -> bool {
        let (module, action) = match permission.split_once('.') {
            Some((module, action)) => (module, Some(action)),
            None => (permission, None),
        };

        self.permissions.iter().any(|granted| match granted {
            Value::String(name) => name == permission,
            Value::Object(grant) => {
                grant.get("module").and_then(Value::as_str) == Some(module)
                    && action.is_none_or(|action| {
                        grant
                            .get("actions")
                            .and_then(Value::as_array)
                            .is_some_and(|actions| {
                                actions.iter().any(|a| a.as_str() == Some(action))
                            })
                    })
            }
            _ => false,
        })
    }
}

fn permissions_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}
