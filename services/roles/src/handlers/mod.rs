pub mod health;
pub mod legacy;
pub mod me;
pub mod roles;
