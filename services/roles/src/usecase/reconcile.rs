//! Self-healing subject-id rewrites.
//!
//! When a role row is found by email but carries a different subject id, the
//! identity provider has re-issued the id for that person. Rewriting the row
//! lets later id-only lookups succeed without the email fallback. Every write
//! is a keyed update: repeating it, or racing another session doing the same,
//! at worst rewrites a value to itself.

use uuid::Uuid;

use gymdash_domain::id::{Email, SubjectId};

use crate::domain::repository::RoleRepository;
use crate::domain::types::RoleAssignment;
use crate::error::RolesServiceError;

/// Rows whose stored subject id differs from `subject_id`. Pure.
pub fn plan_reconciliation<'a>(
    subject_id: &SubjectId,
    rows: &'a [RoleAssignment],
) -> Vec<&'a RoleAssignment> {
    rows.iter().filter(|row| row.is_stale_for(subject_id)).collect()
}

pub struct ReconcileSubjectUseCase<'a, R: RoleRepository> {
    pub repo: &'a R,
}

impl<R: RoleRepository> ReconcileSubjectUseCase<'_, R> {
    /// Rewrite every active row with `email` to `subject_id` in one update.
    pub async fn by_email(
        &self,
        email: &Email,
        subject_id: &SubjectId,
    ) -> Result<u64, RolesServiceError> {
        self.repo
            .reassign_subject_by_email(email, subject_id.as_str())
            .await
    }

    /// Rewrite a single row to `subject_id`.
    pub async fn by_row_id(
        &self,
        id: Uuid,
        subject_id: &SubjectId,
    ) -> Result<u64, RolesServiceError> {
        self.repo
            .reassign_subject_by_id(id, subject_id.as_str())
            .await
    }
}
