pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;

pub use database::{ConnectionProfile, Database};
pub use error::{Result, StorageError};
