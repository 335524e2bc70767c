//! Getchanski user persistence
//!
//! One record is written per successful OAuth callback. Records are never read
//! back by this service.

pub mod db;
pub mod error;

pub use db::{user_item, DynamoUserRepository, UserRepository};
pub use error::DbError;
