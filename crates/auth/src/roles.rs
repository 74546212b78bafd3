use core::str::FromStr;

use serde::{Deserialize, Serialize};

use barbermatch_core::DomainError;

/// Role identifier used for RBAC.
///
/// The set is closed: every account carries exactly one of these.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Barber,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Client, Role::Barber, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Barber => "barber",
            Role::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "barber" => Ok(Role::Barber),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!(
                "role must be one of: client, barber, admin (got '{other}')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Barber).unwrap(), "\"barber\"");
    }
}
