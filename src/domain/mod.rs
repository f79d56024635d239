//! Domain types: the user record and request filters.

pub mod user;

pub use user::{SeedUser, User, UserFilter, UserId, UserIdError, SEED_USERS};
