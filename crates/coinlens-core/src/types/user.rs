//! User identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user's server-assigned identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's role, as assigned by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Content administrators: full access plus the admin area.
    Admin,
    /// Ordinary signed-in users.
    Member,
}

impl Role {
    /// Returns true for the admin role.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// The landing route for this role, used by redirect decisions.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Member => "/",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

/// A signed-in user as reported by the identity endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_wire_format() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("admin"));
        assert_eq!(serde_json::to_value(Role::Member).unwrap(), json!("member"));
    }

    #[test]
    fn user_deserializes() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "name": "Alice",
            "email": "alice@example.com",
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(user.id, UserId(7));
        assert!(user.role.is_admin());
    }

    #[test]
    fn role_home_paths() {
        assert_eq!(Role::Admin.home_path(), "/admin");
        assert_eq!(Role::Member.home_path(), "/");
    }
}
