//! Ports the use cases depend on.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! handlers generic over the repository still produce `Send` futures.

use std::future::Future;

use uuid::Uuid;

use gymdash_domain::id::Email;
use gymdash_domain::pagination::PageRequest;
use gymdash_domain::role::RoleType;

use crate::domain::types::RoleAssignment;
use crate::error::RolesServiceError;

/// Repository for role rows.
pub trait RoleRepository: Send + Sync {
    /// Active rows whose stored subject id equals `subject_id` exactly.
    fn find_active_by_subject(
        &self,
        subject_id: &str,
    ) -> impl Future<Output = Result<Vec<RoleAssignment>, RolesServiceError>> + Send;

    /// Active rows whose stored email equals `email`, ignoring case.
    fn find_active_by_email(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<Vec<RoleAssignment>, RolesServiceError>> + Send;

    /// Every active row. Used by the fallback scan only.
    fn list_active(
        &self,
    ) -> impl Future<Output = Result<Vec<RoleAssignment>, RolesServiceError>> + Send;

    /// Rewrite the subject id of one row. Returns the number of rows changed
    /// (0 when the row already carries `subject_id`).
    fn reassign_subject_by_id(
        &self,
        id: Uuid,
        subject_id: &str,
    ) -> impl Future<Output = Result<u64, RolesServiceError>> + Send;

    /// Rewrite the subject id of every active row with `email` whose subject id
    /// differs. Returns the number of rows changed.
    fn reassign_subject_by_email(
        &self,
        email: &Email,
        subject_id: &str,
    ) -> impl Future<Output = Result<u64, RolesServiceError>> + Send;

    /// Row for this subject id and role, active or not. Prefers an active row.
    fn find_by_subject_and_role(
        &self,
        subject_id: &str,
        role_type: RoleType,
    ) -> impl Future<Output = Result<Option<RoleAssignment>, RolesServiceError>> + Send;

    fn insert(
        &self,
        assignment: &RoleAssignment,
    ) -> impl Future<Output = Result<(), RolesServiceError>> + Send;

    /// Mark a row active again, replacing its email when one is given.
    /// Returns the row as stored after the update.
    fn reactivate(
        &self,
        id: Uuid,
        email: Option<&Email>,
    ) -> impl Future<Output = Result<RoleAssignment, RolesServiceError>> + Send;

    /// Mark a row inactive. Returns `false` if no row has this id.
    fn deactivate(&self, id: Uuid) -> impl Future<Output = Result<bool, RolesServiceError>> + Send;

    /// All rows, active or not, newest first.
    fn list(
        &self,
        page: PageRequest,
    ) -> impl Future<Output = Result<Vec<RoleAssignment>, RolesServiceError>> + Send;

    /// Check the backing store is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), RolesServiceError>> + Send;
}

/// Repository for legacy-keyed member data.
pub trait ProfileRepository: Send + Sync {
    /// Re-key every profile with `email` (ignoring case) whose subject id
    /// differs from `subject_id`. Returns the number of rows changed.
    fn rekey_by_email(
        &self,
        email: &Email,
        subject_id: &str,
    ) -> impl Future<Output = Result<u64, RolesServiceError>> + Send;
}
