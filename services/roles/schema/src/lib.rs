//! sea-orm entities owned by the roles service.

pub mod member_profiles;
pub mod role_assignments;
