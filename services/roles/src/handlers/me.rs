use axum::{Json, extract::State};
use serde::Serialize;

use gymdash_auth_types::identity::SessionIdentity;
use gymdash_domain::role::EffectiveRole;

use crate::domain::repository::{ProfileRepository, RoleRepository};
use crate::state::AppState;
use crate::usecase::resolve::{EffectiveRoleUseCase, HasElevatedRoleUseCase};

// ── GET /roles/@me/access ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AccessResponse {
    pub has_access: bool,
}

pub async fn get_my_access<R, P>(
    identity: SessionIdentity,
    State(state): State<AppState<R, P>>,
) -> Json<AccessResponse>
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    let usecase = HasElevatedRoleUseCase {
        repo: state.role_repo(),
    };
    let has_access = usecase
        .execute(&identity.subject_id, identity.primary_email())
        .await;
    Json(AccessResponse { has_access })
}

// ── GET /roles/@me ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RoleResponse {
    pub role: EffectiveRole,
}

pub async fn get_my_role<R, P>(
    identity: SessionIdentity,
    State(state): State<AppState<R, P>>,
) -> Json<RoleResponse>
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    let usecase = EffectiveRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase
        .execute(&identity.subject_id, identity.primary_email())
        .await;
    Json(RoleResponse { role })
}
