pub mod assignment;
pub mod legacy;
pub mod reconcile;
pub mod resolve;
