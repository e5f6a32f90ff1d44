use sea_orm::DatabaseConnection;

use crate::infra::db::{DbProfileRepository, DbRoleRepository};

/// Shared application state passed to every handler via axum `State`.
///
/// Generic over the repositories so the router can be driven by in-memory
/// stores in tests.
#[derive(Clone)]
pub struct AppState<R = DbRoleRepository, P = DbProfileRepository> {
    pub roles: R,
    pub profiles: P,
}

impl AppState {
    pub fn from_db(db: DatabaseConnection) -> Self {
        Self {
            roles: DbRoleRepository { db: db.clone() },
            profiles: DbProfileRepository { db },
        }
    }
}

impl<R: Clone, P: Clone> AppState<R, P> {
    pub fn role_repo(&self) -> R {
        self.roles.clone()
    }

    pub fn profile_repo(&self) -> P {
        self.profiles.clone()
    }
}
