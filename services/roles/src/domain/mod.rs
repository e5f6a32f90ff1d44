pub mod matching;
pub mod repository;
pub mod types;
