use anyhow::{Context, Result};
use serde::Deserialize;

use gymdash_domain::id::{Email, SubjectId};
use gymdash_domain::role::RoleType;
use gymdash_roles::domain::repository::RoleRepository;
use gymdash_roles::usecase::assignment::{AssignRoleInput, AssignRoleUseCase};

#[derive(Debug, Deserialize)]
pub struct SeedEntry {
    pub user_id: SubjectId,
    #[serde(default)]
    pub email: Option<Email>,
    pub role_type: RoleType,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub assigned: usize,
    pub deactivated: usize,
}

pub fn parse(raw: &str) -> Result<Vec<SeedEntry>> {
    serde_json::from_str(raw).context("invalid role seed file")
}

/// Apply entries in order. Stops at the first storage error.
///
/// Active entries take the same path as `POST /roles`. Inactive entries are
/// never made active, not even for a moment: an active row is deactivated,
/// an inactive one is left as is, a missing one is inserted inactive.
pub async fn apply<R: RoleRepository>(repo: R, entries: Vec<SeedEntry>) -> Result<SeedSummary> {
    let usecase = AssignRoleUseCase { repo };
    let mut summary = SeedSummary::default();
    for entry in entries {
        let input = AssignRoleInput {
            user_id: entry.user_id.clone(),
            email: entry.email,
            role_type: entry.role_type,
        };
        if entry.is_active {
            usecase
                .apply(input)
                .await
                .with_context(|| format!("assign {} to {}", entry.role_type, entry.user_id))?;
            summary.assigned += 1;
        } else {
            usecase
                .apply_inactive(input)
                .await
                .with_context(|| format!("deactivate {} for {}", entry.role_type, entry.user_id))?;
            summary.deactivated += 1;
        }
    }
    Ok(summary)
}
