use std::collections::BTreeSet;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TalentoError;

// =============================================================================
// Permission tags
// =============================================================================

/// Coarse-grained role marker used to gate actions.
///
/// The vocabulary is shared by every feature module that registers actions.
/// Ordering is derived so that permission sets iterate deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Admin,
    Hr,
    Jefe,
    Empleado,
}

impl Permission {
    /// Every tag in the vocabulary.
    pub const ALL: [Permission; 4] = [
        Permission::Admin,
        Permission::Hr,
        Permission::Jefe,
        Permission::Empleado,
    ];
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Admin => write!(f, "admin"),
            Permission::Hr => write!(f, "hr"),
            Permission::Jefe => write!(f, "jefe"),
            Permission::Empleado => write!(f, "empleado"),
        }
    }
}

impl std::str::FromStr for Permission {
    type Err = TalentoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Permission::Admin),
            "hr" | "rrhh" => Ok(Permission::Hr),
            "jefe" | "manager" => Ok(Permission::Jefe),
            "empleado" | "employee" => Ok(Permission::Empleado),
            _ => Err(TalentoError::UnknownPermission(s.to_string())),
        }
    }
}

/// Ordered set of permission tags.
pub type PermissionSet = BTreeSet<Permission>;

// =============================================================================
// Caller context
// =============================================================================

/// Who is invoking an action.
///
/// Roles drive authorization; `company_id` is the tenant scope handlers use
/// to restrict what they read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub user_id: Option<Uuid>,
    pub roles: PermissionSet,
    pub company_id: Option<Uuid>,
}

impl CallerContext {
    pub fn new(roles: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            user_id: None,
            roles: roles.into_iter().collect(),
            company_id: None,
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_company(mut self, company_id: Uuid) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

// =============================================================================
// Timestamp
// =============================================================================

/// Unix timestamp in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }
}
