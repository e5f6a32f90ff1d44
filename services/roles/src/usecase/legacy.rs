use tracing::info;

use gymdash_domain::id::{Email, SubjectId};

use crate::domain::repository::ProfileRepository;
use crate::domain::types::LegacyMigration;
use crate::error::RolesServiceError;

/// Re-keys member data stored under a previous subject id, matched by email.
///
/// Independent of role resolution: running it before or after the resolver
/// gives the same roles.
pub struct MigrateLegacyDataUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> MigrateLegacyDataUseCase<P> {
    pub async fn execute(
        &self,
        email: Option<&Email>,
        subject_id: &SubjectId,
    ) -> Result<LegacyMigration, RolesServiceError> {
        let email = email.ok_or(RolesServiceError::MissingData)?;
        let rows = self
            .profiles
            .rekey_by_email(email, subject_id.as_str())
            .await?;
        if rows > 0 {
            info!(subject_id = %subject_id, rows, "migrated legacy member data");
        }
        Ok(LegacyMigration {
            migrated: rows > 0,
            rows,
        })
    }
}
