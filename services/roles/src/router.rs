use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use gymdash_auth_types::identity::SessionSecret;
use gymdash_core::health::healthz;
use gymdash_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::repository::{ProfileRepository, RoleRepository};
use crate::handlers::{
    health::readyz,
    legacy::migrate_legacy_data,
    me::{get_my_access, get_my_role},
    roles::{assign_role, deactivate_role, list_roles},
};
use crate::state::AppState;

pub fn build_router<R, P>(state: AppState<R, P>, secret: SessionSecret) -> Router
where
    R: RoleRepository + Clone + 'static,
    P: ProfileRepository + Clone + 'static,
{
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<R, P>))
        // Current identity
        .route("/roles/@me", get(get_my_role::<R, P>))
        .route("/roles/@me/access", get(get_my_access::<R, P>))
        .route("/migrations/legacy-data", post(migrate_legacy_data::<R, P>))
        // Administration
        .route("/roles", get(list_roles::<R, P>).post(assign_role::<R, P>))
        .route("/roles/{id}", delete(deactivate_role::<R, P>))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(Extension(secret)),
        )
}
