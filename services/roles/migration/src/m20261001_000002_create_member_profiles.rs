use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MemberProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MemberProfiles::UserId).text().not_null())
                    .col(ColumnDef::new(MemberProfiles::Email).text().not_null())
                    .col(ColumnDef::new(MemberProfiles::DisplayName).text().null())
                    .col(
                        ColumnDef::new(MemberProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MemberProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MemberProfiles {
    Table,
    Id,
    UserId,
    Email,
    DisplayName,
    CreatedAt,
    UpdatedAt,
}
