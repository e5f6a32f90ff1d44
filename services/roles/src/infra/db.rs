use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
    sea_query::{Expr, Func},
};
use tracing::warn;
use uuid::Uuid;

use gymdash_domain::id::Email;
use gymdash_domain::pagination::PageRequest;
use gymdash_domain::role::RoleType;
use gymdash_roles_schema::{member_profiles, role_assignments};

use crate::domain::repository::{ProfileRepository, RoleRepository};
use crate::domain::types::RoleAssignment;
use crate::error::RolesServiceError;

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

/// `lower(email) = <email>`. Stored emails are lowercased on write, but rows
/// imported before that rule may not be.
fn role_email_eq(email: &Email) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(role_assignments::Column::Email))).eq(email.as_str())
}

impl RoleRepository for DbRoleRepository {
    async fn find_active_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Vec<RoleAssignment>, RolesServiceError> {
        let models = role_assignments::Entity::find()
            .filter(role_assignments::Column::UserId.eq(subject_id))
            .filter(role_assignments::Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .context("find roles by subject id")?;
        Ok(assignments_from_models(models))
    }

    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Vec<RoleAssignment>, RolesServiceError> {
        let models = role_assignments::Entity::find()
            .filter(role_email_eq(email))
            .filter(role_assignments::Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .context("find roles by email")?;
        Ok(assignments_from_models(models))
    }

    async fn list_active(&self) -> Result<Vec<RoleAssignment>, RolesServiceError> {
        let models = role_assignments::Entity::find()
            .filter(role_assignments::Column::IsActive.eq(true))
            .order_by_asc(role_assignments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list active roles")?;
        Ok(assignments_from_models(models))
    }

    async fn reassign_subject_by_id(
        &self,
        id: Uuid,
        subject_id: &str,
    ) -> Result<u64, RolesServiceError> {
        let result = role_assignments::Entity::update_many()
            .col_expr(role_assignments::Column::UserId, Expr::value(subject_id))
            .col_expr(role_assignments::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(role_assignments::Column::Id.eq(id))
            .filter(role_assignments::Column::UserId.ne(subject_id))
            .exec(&self.db)
            .await
            .context("reassign role subject by id")?;
        Ok(result.rows_affected)
    }

    async fn reassign_subject_by_email(
        &self,
        email: &Email,
        subject_id: &str,
    ) -> Result<u64, RolesServiceError> {
        let result = role_assignments::Entity::update_many()
            .col_expr(role_assignments::Column::UserId, Expr::value(subject_id))
            .col_expr(role_assignments::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(role_email_eq(email))
            .filter(role_assignments::Column::IsActive.eq(true))
            .filter(role_assignments::Column::UserId.ne(subject_id))
            .exec(&self.db)
            .await
            .context("reassign role subject by email")?;
        Ok(result.rows_affected)
    }

    async fn find_by_subject_and_role(
        &self,
        subject_id: &str,
        role_type: RoleType,
    ) -> Result<Option<RoleAssignment>, RolesServiceError> {
        let model = role_assignments::Entity::find()
            .filter(role_assignments::Column::UserId.eq(subject_id))
            .filter(role_assignments::Column::RoleType.eq(role_type.as_str()))
            .order_by_desc(role_assignments::Column::IsActive)
            .one(&self.db)
            .await
            .context("find role by subject id and type")?;
        Ok(model.and_then(assignment_from_model))
    }

    async fn insert(&self, assignment: &RoleAssignment) -> Result<(), RolesServiceError> {
        role_assignments::ActiveModel {
            id: Set(assignment.id),
            user_id: Set(assignment.user_id.clone()),
            email: Set(assignment.email.clone()),
            role_type: Set(assignment.role_type.as_str().to_owned()),
            is_active: Set(assignment.is_active),
            created_at: Set(assignment.created_at),
            updated_at: Set(assignment.updated_at),
        }
        .insert(&self.db)
        .await
        .context("insert role")?;
        Ok(())
    }

    async fn reactivate(
        &self,
        id: Uuid,
        email: Option<&Email>,
    ) -> Result<RoleAssignment, RolesServiceError> {
        let mut am = role_assignments::ActiveModel {
            id: Set(id),
            is_active: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(email) = email {
            am.email = Set(Some(email.as_str().to_owned()));
        }
        let model = am.update(&self.db).await.context("reactivate role")?;
        assignment_from_model(model).ok_or(RolesServiceError::InvalidRoleType)
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, RolesServiceError> {
        let result = role_assignments::Entity::update_many()
            .col_expr(role_assignments::Column::IsActive, Expr::value(false))
            .col_expr(role_assignments::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(role_assignments::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("deactivate role")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<RoleAssignment>, RolesServiceError> {
        let page = page.clamped();
        let models = role_assignments::Entity::find()
            .order_by_desc(role_assignments::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list roles")?;
        Ok(assignments_from_models(models))
    }

    async fn ping(&self) -> Result<(), RolesServiceError> {
        self.db.ping().await.context("ping database")?;
        Ok(())
    }
}

/// `None` for rows whose stored role type is not one we know.
fn assignment_from_model(model: role_assignments::Model) -> Option<RoleAssignment> {
    let role_type = match model.role_type.parse::<RoleType>() {
        Ok(role_type) => role_type,
        Err(e) => {
            warn!(row_id = %model.id, error = %e, "skipping role row with unknown role type");
            return None;
        }
    };
    Some(RoleAssignment {
        id: model.id,
        user_id: model.user_id,
        email: model.email,
        role_type,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn assignments_from_models(models: Vec<role_assignments::Model>) -> Vec<RoleAssignment> {
    models.into_iter().filter_map(assignment_from_model).collect()
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn rekey_by_email(&self, email: &Email, subject_id: &str) -> Result<u64, RolesServiceError> {
        let result = member_profiles::Entity::update_many()
            .col_expr(member_profiles::Column::UserId, Expr::value(subject_id))
            .col_expr(member_profiles::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(
                Expr::expr(Func::lower(Expr::col(member_profiles::Column::Email)))
                    .eq(email.as_str()),
            )
            .filter(member_profiles::Column::UserId.ne(subject_id))
            .exec(&self.db)
            .await
            .context("rekey member profiles by email")?;
        Ok(result.rows_affected)
    }
}
