use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(RoleAssignments::Table)
                    .col(RoleAssignments::UserId)
                    .name("idx_role_assignments_user_id")
                    .to_owned(),
            )
            .await?;
        let db = manager.get_connection();
        db.execute_unprepared(CREATE_ROLE_EMAIL_INDEX).await?;
        db.execute_unprepared(CREATE_PROFILE_EMAIL_INDEX).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_member_profiles_email",
            "idx_role_assignments_email",
            "idx_role_assignments_user_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

// Email lookups filter on `lower(email)`; a plain column index would not be used.
const CREATE_ROLE_EMAIL_INDEX: &str =
    "CREATE INDEX idx_role_assignments_email ON role_assignments (lower(email))";
const CREATE_PROFILE_EMAIL_INDEX: &str =
    "CREATE INDEX idx_member_profiles_email ON member_profiles (lower(email))";

#[derive(Iden)]
enum RoleAssignments {
    Table,
    UserId,
}
