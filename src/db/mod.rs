//! SQLite storage for the `users` table.
//!
//! - `seed` drops, recreates and seeds the database file
//! - `store` serves reads, opening one connection per lookup

pub mod seed;
pub mod store;

pub use seed::reset_database;
pub use store::UserStore;
