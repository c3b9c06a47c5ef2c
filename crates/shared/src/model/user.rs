use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Identity returned by `admin/users/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// `None` for a null or unrecognised role; such users are never granted access.
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub date_joined: Option<String>,
}

impl User {
    pub fn has_role(&self, expected: &str) -> bool {
        self.role.is_some_and(|role| role.as_str() == expected)
    }
}

fn deserialize_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_me_payload() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "username": "marie",
            "email": "marie@example.com",
            "role": "editor",
            "is_active": true,
            "date_joined": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.role, Some(Role::Editor));
        assert!(user.has_role("editor"));
        assert!(!user.has_role("admin"));
    }

    #[test]
    fn unknown_or_null_role_is_none() {
        let user: User =
            serde_json::from_value(json!({ "id": 1, "username": "x", "role": "superuser" }))
                .unwrap();
        assert_eq!(user.role, None);

        let user: User =
            serde_json::from_value(json!({ "id": 1, "username": "x", "role": null })).unwrap();
        assert_eq!(user.role, None);
        assert!(!user.has_role(""));
    }
}
