//! Repository interfaces for persistence collaborators.

pub mod user;

pub use user::{InMemoryUserRepository, UserRepository};
