use sea_orm::entity::prelude::*;

/// Elevated dashboard role granted to an identity.
///
/// `user_id` is the identity provider's opaque subject id and may be stale
/// after the provider relinks an account; `email` is the stable key used to
/// reconcile it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "role_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub email: Option<String>,
    /// `admin`, `socio` or `empresario`.
    pub role_type: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
