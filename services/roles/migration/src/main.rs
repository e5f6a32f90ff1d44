use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(gymdash_roles_migration::Migrator).await;
}
