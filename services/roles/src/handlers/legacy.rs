use axum::{Json, extract::State};
use serde::Serialize;

use gymdash_auth_types::identity::SessionIdentity;

use crate::domain::repository::{ProfileRepository, RoleRepository};
use crate::error::RolesServiceError;
use crate::state::AppState;
use crate::usecase::legacy::MigrateLegacyDataUseCase;

// ── POST /migrations/legacy-data ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct LegacyMigrationResponse {
    pub migrated: bool,
    pub rows: u64,
}

pub async fn migrate_legacy_data<R, P>(
    identity: SessionIdentity,
    State(state): State<AppState<R, P>>,
) -> Result<Json<LegacyMigrationResponse>, RolesServiceError>
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    let usecase = MigrateLegacyDataUseCase {
        profiles: state.profile_repo(),
    };
    let result = usecase
        .execute(identity.primary_email(), &identity.subject_id)
        .await?;
    Ok(Json(LegacyMigrationResponse {
        migrated: result.migrated,
        rows: result.rows,
    }))
}
