//! Role resolution for an authenticated identity.
//!
//! Neither use case returns an error: a failed lookup is logged and counts as
//! "no rows" for that path, and a failed reconciliation write is logged and
//! ignored. The worst outcome of a backend failure is denied access.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use gymdash_domain::id::{Email, SubjectId};
use gymdash_domain::role::EffectiveRole;

use crate::domain::matching::fallback_match;
use crate::domain::repository::RoleRepository;
use crate::domain::types::{RoleAssignment, RoleLookupResult};
use crate::usecase::reconcile::{ReconcileSubjectUseCase, plan_reconciliation};

/// Active rows stored under exactly this subject id.
pub async fn lookup_by_subject<R: RoleRepository>(
    repo: &R,
    subject_id: &SubjectId,
) -> RoleLookupResult {
    let result =
        RoleLookupResult::from_query(repo.find_active_by_subject(subject_id.as_str()).await);
    if let RoleLookupResult::Error(ref e) = result {
        warn!(error = %e, subject_id = %subject_id, "role lookup by subject id failed");
    }
    result
}

/// Active rows stored under this email, ignoring case.
pub async fn lookup_by_email<R: RoleRepository>(
    repo: &R,
    subject_id: &SubjectId,
    email: &Email,
) -> RoleLookupResult {
    let result = RoleLookupResult::from_query(repo.find_active_by_email(email).await);
    if let RoleLookupResult::Error(ref e) = result {
        warn!(error = %e, subject_id = %subject_id, "role lookup by email failed");
    }
    result
}

/// Union of two row sets, keeping the first occurrence of each row id.
pub fn merge_rows(
    by_subject: Vec<RoleAssignment>,
    by_email: Vec<RoleAssignment>,
) -> Vec<RoleAssignment> {
    let mut seen = HashSet::new();
    by_subject
        .into_iter()
        .chain(by_email)
        .filter(|row| seen.insert(row.id))
        .collect()
}

// ── HasElevatedRole ──────────────────────────────────────────────────────────

/// Does the identity hold any active elevated role? Gates dashboard access.
pub struct HasElevatedRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> HasElevatedRoleUseCase<R> {
    pub async fn execute(&self, subject_id: &SubjectId, email: Option<&Email>) -> bool {
        // 1. Exact subject id
        if lookup_by_subject(&self.repo, subject_id).await.is_found() {
            return true;
        }

        // 2. Email, healing a stale subject id on the way
        if let Some(email) = email {
            let by_email = lookup_by_email(&self.repo, subject_id, email).await;
            if by_email.is_found() {
                if !plan_reconciliation(subject_id, by_email.rows()).is_empty() {
                    let reconcile = ReconcileSubjectUseCase { repo: &self.repo };
                    match reconcile.by_email(email, subject_id).await {
                        Ok(rows) => info!(subject_id = %subject_id, rows, "reconciled subject id by email"),
                        Err(e) => warn!(error = %e, subject_id = %subject_id, "subject id reconciliation failed"),
                    }
                }
                return true;
            }
        }

        // 3. Fallback scan over every active row
        let rows = match self.repo.list_active().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, subject_id = %subject_id, "fallback role scan failed");
                return false;
            }
        };
        match fallback_match(&rows, subject_id.as_str()) {
            Some((row, strategy)) => {
                info!(
                    subject_id = %subject_id,
                    row_id = %row.id,
                    strategy = strategy.as_str(),
                    "matched role row by fallback strategy"
                );
                true
            }
            None => {
                debug!(subject_id = %subject_id, "no elevated role found");
                false
            }
        }
    }
}

// ── EffectiveRole ────────────────────────────────────────────────────────────

/// The single role that drives navigation, by precedence over every active row
/// found by subject id or email.
pub struct EffectiveRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> EffectiveRoleUseCase<R> {
    pub async fn execute(&self, subject_id: &SubjectId, email: Option<&Email>) -> EffectiveRole {
        let (by_subject, by_email) = tokio::join!(
            lookup_by_subject(&self.repo, subject_id),
            async {
                match email {
                    Some(email) => lookup_by_email(&self.repo, subject_id, email).await,
                    None => RoleLookupResult::NotFound,
                }
            }
        );

        let stale = plan_reconciliation(subject_id, by_email.rows());
        if !stale.is_empty() {
            let reconcile = ReconcileSubjectUseCase { repo: &self.repo };
            for row in stale {
                match reconcile.by_row_id(row.id, subject_id).await {
                    Ok(_) => info!(subject_id = %subject_id, row_id = %row.id, "reconciled subject id"),
                    Err(e) => warn!(
                        error = %e,
                        subject_id = %subject_id,
                        row_id = %row.id,
                        "subject id reconciliation failed"
                    ),
                }
            }
        }

        let rows = merge_rows(by_subject.into_rows(), by_email.into_rows());
        EffectiveRole::from_roles(rows.iter().map(|row| row.role_type))
    }
}
