use chrono::{DateTime, Utc};
use uuid::Uuid;

use gymdash_domain::id::{Email, SubjectId};
use gymdash_domain::role::RoleType;

use crate::error::RolesServiceError;

/// A persisted role row.
///
/// `user_id` is kept as the raw stored string: it may carry stale ids or
/// encoding artifacts that fallback matching has to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub id: Uuid,
    pub user_id: String,
    pub email: Option<String>,
    pub role_type: RoleType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleAssignment {
    pub fn new_active(user_id: &SubjectId, email: Option<&Email>, role_type: RoleType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id: user_id.as_str().to_owned(),
            email: email.map(|e| e.as_str().to_owned()),
            role_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the stored subject id differs from the current session's id.
    pub fn is_stale_for(&self, subject_id: &SubjectId) -> bool {
        self.user_id != subject_id.as_str()
    }
}

/// Outcome of one role lookup path (by subject id or by email).
#[derive(Debug)]
pub enum RoleLookupResult {
    /// At least one active row matched.
    Found(Vec<RoleAssignment>),
    NotFound,
    Error(RolesServiceError),
}

impl RoleLookupResult {
    /// Build from a repository result. Inactive rows are dropped here so they
    /// can never grant access, whatever the data source returned.
    pub fn from_query(result: Result<Vec<RoleAssignment>, RolesServiceError>) -> Self {
        match result {
            Ok(mut rows) => {
                rows.retain(|row| row.is_active);
                if rows.is_empty() {
                    Self::NotFound
                } else {
                    Self::Found(rows)
                }
            }
            Err(e) => Self::Error(e),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Matched rows; empty for `NotFound` and `Error`.
    pub fn rows(&self) -> &[RoleAssignment] {
        match self {
            Self::Found(rows) => rows,
            Self::NotFound | Self::Error(_) => &[],
        }
    }

    pub fn into_rows(self) -> Vec<RoleAssignment> {
        match self {
            Self::Found(rows) => rows,
            Self::NotFound | Self::Error(_) => Vec::new(),
        }
    }
}

/// Result of re-keying legacy member data to the current subject id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyMigration {
    /// `true` when at least one row changed; clients reload in that case.
    pub migrated: bool,
    pub rows: u64,
}
