use serde::{Deserialize, Serialize};

/// Role bound to an identity at account-creation time.
///
/// The enumeration is closed. Accounts whose stored role attribute is
/// missing, empty, or an unrecognized string are "unassigned", which this
/// codebase represents as `Option<Role> = None`; the gate routes unassigned
/// sessions to login (least privilege).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    User,
}

impl Role {
    /// Parse a stored role attribute. Unknown values yield `None` (unassigned).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
            Self::User => "user",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_the_closed_set_only() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" Member "), Some(Role::Member));
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("trainer"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serde_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(role, Role::Member);
    }
}
