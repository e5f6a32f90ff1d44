use axum::{extract::State, http::StatusCode};

use gymdash_core::health::readiness_status;

use crate::domain::repository::{ProfileRepository, RoleRepository};
use crate::state::AppState;

/// `GET /readyz`: ready once the role store answers.
pub async fn readyz<R, P>(State(state): State<AppState<R, P>>) -> StatusCode
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    readiness_status(state.roles.ping().await)
}
