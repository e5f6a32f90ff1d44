use sea_orm_migration::prelude::*;

mod m20261001_000001_create_role_assignments;
mod m20261001_000002_create_member_profiles;
mod m20261001_000003_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_role_assignments::Migration),
            Box::new(m20261001_000002_create_member_profiles::Migration),
            Box::new(m20261001_000003_add_lookup_indexes::Migration),
        ]
    }
}
