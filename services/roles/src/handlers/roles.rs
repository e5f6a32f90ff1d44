use axum::{
    Json,
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gymdash_auth_types::identity::SessionIdentity;
use gymdash_domain::id::{Email, SubjectId};
use gymdash_domain::pagination::PageRequest;
use gymdash_domain::role::{EffectiveRole, RoleType};

use crate::domain::repository::{ProfileRepository, RoleRepository};
use crate::domain::types::RoleAssignment;
use crate::error::RolesServiceError;
use crate::state::AppState;
use crate::usecase::assignment::{
    AssignRoleInput, AssignRoleUseCase, DeactivateRoleUseCase, ListRolesUseCase, ensure_admin,
};
use crate::usecase::resolve::EffectiveRoleUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RoleAssignmentResponse {
    pub id: Uuid,
    pub user_id: String,
    pub email: Option<String>,
    pub role_type: RoleType,
    pub is_active: bool,
    #[serde(serialize_with = "gymdash_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "gymdash_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(row: RoleAssignment) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            email: row.email,
            role_type: row.role_type,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

async fn caller_role<R: RoleRepository>(repo: R, identity: &SessionIdentity) -> EffectiveRole {
    EffectiveRoleUseCase { repo }
        .execute(&identity.subject_id, identity.primary_email())
        .await
}

// ── GET /roles ───────────────────────────────────────────────────────────────

pub async fn list_roles<R, P>(
    identity: SessionIdentity,
    State(state): State<AppState<R, P>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<RoleAssignmentResponse>>, RolesServiceError>
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    let caller = caller_role(state.role_repo(), &identity).await;
    ensure_admin(caller)?;

    let page: PageRequest = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| RolesServiceError::InvalidQuery)?
        .unwrap_or_default();

    let usecase = ListRolesUseCase {
        repo: state.role_repo(),
    };
    let rows = usecase.execute(caller, page).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── POST /roles ──────────────────────────────────────────────────────────────

/// Missing fields parse as empty and fail validation with the field's own kind.
#[derive(Deserialize)]
pub struct AssignRoleRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role_type: String,
}

pub async fn assign_role<R, P>(
    identity: SessionIdentity,
    State(state): State<AppState<R, P>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RoleAssignmentResponse>), RolesServiceError>
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    let caller = caller_role(state.role_repo(), &identity).await;
    // Body is read only after the caller is known to be an admin.
    ensure_admin(caller)?;

    let body: AssignRoleRequest =
        serde_json::from_slice(&body).map_err(|_| RolesServiceError::MissingData)?;
    let user_id = SubjectId::new(body.user_id).map_err(|_| RolesServiceError::MissingData)?;
    let email = body
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|_| RolesServiceError::InvalidEmail)?;
    let role_type = body
        .role_type
        .parse::<RoleType>()
        .map_err(|_| RolesServiceError::InvalidRoleType)?;

    let usecase = AssignRoleUseCase {
        repo: state.role_repo(),
    };
    let row = usecase
        .execute(
            caller,
            AssignRoleInput {
                user_id,
                email,
                role_type,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

// ── DELETE /roles/{id} ───────────────────────────────────────────────────────

pub async fn deactivate_role<R, P>(
    identity: SessionIdentity,
    State(state): State<AppState<R, P>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, RolesServiceError>
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    let caller = caller_role(state.role_repo(), &identity).await;
    let usecase = DeactivateRoleUseCase {
        repo: state.role_repo(),
    };
    usecase.execute(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
