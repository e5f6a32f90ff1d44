use uuid::Uuid;

use gymdash_domain::id::{Email, SubjectId};
use gymdash_domain::pagination::PageRequest;
use gymdash_domain::role::{EffectiveRole, RoleType};

use crate::domain::repository::RoleRepository;
use crate::domain::types::RoleAssignment;
use crate::error::RolesServiceError;

/// Role administration is reserved to callers whose effective role is admin.
pub fn ensure_admin(caller: EffectiveRole) -> Result<(), RolesServiceError> {
    if caller == EffectiveRole::Admin {
        Ok(())
    } else {
        Err(RolesServiceError::Forbidden)
    }
}

// ── ListRoles ────────────────────────────────────────────────────────────────

pub struct ListRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> ListRolesUseCase<R> {
    pub async fn execute(
        &self,
        caller: EffectiveRole,
        page: PageRequest,
    ) -> Result<Vec<RoleAssignment>, RolesServiceError> {
        ensure_admin(caller)?;
        self.repo.list(page.clamped()).await
    }
}

// ── AssignRole ───────────────────────────────────────────────────────────────

pub struct AssignRoleInput {
    pub user_id: SubjectId,
    pub email: Option<Email>,
    pub role_type: RoleType,
}

pub struct AssignRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> AssignRoleUseCase<R> {
    /// Reactivates an existing row for the same subject id and role, otherwise
    /// inserts a new active one.
    pub async fn execute(
        &self,
        caller: EffectiveRole,
        input: AssignRoleInput,
    ) -> Result<RoleAssignment, RolesServiceError> {
        ensure_admin(caller)?;
        self.apply(input).await
    }

    /// Same as [`execute`](Self::execute) without the caller check. Used by
    /// the seed import, which runs with database credentials.
    pub async fn apply(&self, input: AssignRoleInput) -> Result<RoleAssignment, RolesServiceError> {
        let existing = self
            .repo
            .find_by_subject_and_role(input.user_id.as_str(), input.role_type)
            .await?;

        match existing {
            Some(row) => self.repo.reactivate(row.id, input.email.as_ref()).await,
            None => {
                let row =
                    RoleAssignment::new_active(&input.user_id, input.email.as_ref(), input.role_type);
                self.repo.insert(&row).await?;
                Ok(row)
            }
        }
    }

    /// Record a role that must stay inactive without ever activating it: an
    /// active row is deactivated, an inactive one is left alone, a missing one
    /// is inserted inactive. Used by the seed import.
    pub async fn apply_inactive(
        &self,
        input: AssignRoleInput,
    ) -> Result<RoleAssignment, RolesServiceError> {
        let existing = self
            .repo
            .find_by_subject_and_role(input.user_id.as_str(), input.role_type)
            .await?;

        match existing {
            Some(mut row) if row.is_active => {
                if !self.repo.deactivate(row.id).await? {
                    return Err(RolesServiceError::RoleNotFound);
                }
                row.is_active = false;
                Ok(row)
            }
            Some(row) => Ok(row),
            None => {
                let row = RoleAssignment {
                    is_active: false,
                    ..RoleAssignment::new_active(
                        &input.user_id,
                        input.email.as_ref(),
                        input.role_type,
                    )
                };
                self.repo.insert(&row).await?;
                Ok(row)
            }
        }
    }
}

// ── DeactivateRole ───────────────────────────────────────────────────────────

pub struct DeactivateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> DeactivateRoleUseCase<R> {
    pub async fn execute(&self, caller: EffectiveRole, id: Uuid) -> Result<(), RolesServiceError> {
        ensure_admin(caller)?;
        self.apply(id).await
    }

    pub async fn apply(&self, id: Uuid) -> Result<(), RolesServiceError> {
        if self.repo.deactivate(id).await? {
            Ok(())
        } else {
            Err(RolesServiceError::RoleNotFound)
        }
    }
}
