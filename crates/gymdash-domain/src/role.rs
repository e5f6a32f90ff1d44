//! Dashboard role types and the fixed precedence between them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Elevated role stored on a role row.
///
/// Wire/storage format: lowercase string (`"admin"`, `"socio"`, `"empresario"`).
/// `socio` is a referral partner, `empresario` a gym owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Socio,
    Empresario,
    Admin,
}

impl RoleType {
    pub const ALL: [RoleType; 3] = [Self::Admin, Self::Empresario, Self::Socio];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Socio => "socio",
            Self::Empresario => "empresario",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or submitted role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role type: {0}")]
pub struct UnknownRoleType(pub String);

impl FromStr for RoleType {
    type Err = UnknownRoleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "socio" => Ok(Self::Socio),
            "empresario" => Ok(Self::Empresario),
            _ => Err(UnknownRoleType(s.to_owned())),
        }
    }
}

/// The single role that drives navigation for an identity.
///
/// `User` means no active elevated role was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveRole {
    Admin,
    Empresario,
    Socio,
    User,
}

impl EffectiveRole {
    /// Reduce a collection of role types to one role using the fixed precedence
    /// `admin > empresario > socio`. Duplicates and input order are irrelevant.
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = RoleType>,
    {
        let roles: BTreeSet<RoleType> = roles.into_iter().collect();
        if roles.contains(&RoleType::Admin) {
            Self::Admin
        } else if roles.contains(&RoleType::Empresario) {
            Self::Empresario
        } else if roles.contains(&RoleType::Socio) {
            Self::Socio
        } else {
            Self::User
        }
    }

    pub fn is_elevated(self) -> bool {
        !matches!(self, Self::User)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Empresario => "empresario",
            Self::Socio => "socio",
            Self::User => "user",
        }
    }
}

impl From<RoleType> for EffectiveRole {
    fn from(role: RoleType) -> Self {
        match role {
            RoleType::Admin => Self::Admin,
            RoleType::Empresario => Self::Empresario,
            RoleType::Socio => Self::Socio,
        }
    }
}

impl fmt::Display for EffectiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
