//! Repositories for the key-value user table.

pub mod user;

pub use user::{user_item, DynamoUserRepository, UserRepository};
