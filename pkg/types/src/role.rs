use pkg_constants::session::{ROLE_ADMIN, ROLE_LIBRARIAN};
use serde::{Deserialize, Serialize};

/// Coarse permission tier of a signed-in user.
///
/// Parsed case-insensitively; anything unrecognised (including padded
/// strings such as `" admin "`) becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Librarian,
    #[default]
    Unknown,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            ROLE_ADMIN => Role::Admin,
            ROLE_LIBRARIAN => Role::Librarian,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Librarian => ROLE_LIBRARIAN,
            Role::Unknown => "unknown",
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("Librarian"), Role::Librarian);
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        assert_eq!(Role::parse(" admin "), Role::Unknown);
        assert_eq!(Role::parse("librarian\n"), Role::Unknown);
    }

    #[test]
    fn unrecognised_roles_are_unknown() {
        assert_eq!(Role::parse(""), Role::Unknown);
        assert_eq!(Role::parse("member"), Role::Unknown);
    }

    #[test]
    fn serde_uses_lowercase_strings() {
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::Librarian).unwrap(), "\"librarian\"");
    }
}
