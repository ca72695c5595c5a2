use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The part a user plays in the supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Manufacturer,
    Retailer,
}

impl Role {
    /// The value stored in the `role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manufacturer => "manufacturer",
            Role::Retailer => "retailer",
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
            "manufacturer" => Ok(Role::Manufacturer),
            "retailer" => Ok(Role::Retailer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Represents a user in the system.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The user's username.
    pub username: String,
    /// The user's hashed password (Argon2 PHC string).
    pub password: String,
    /// The user's role.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_stored_values() {
        assert_eq!("manufacturer".parse::<Role>(), Ok(Role::Manufacturer));
        assert_eq!("retailer".parse::<Role>(), Ok(Role::Retailer));
        assert!("admin".parse::<Role>().is_err());
        assert!("Retailer".parse::<Role>().is_err());
    }

    #[test]
    fn default_role_is_manufacturer() {
        assert_eq!(Role::default(), Role::Manufacturer);
        assert_eq!(Role::default().to_string(), "manufacturer");
    }
}
