pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;

pub use config::{Config, QueryMode};
pub use db::{reset_database, UserStore};
pub use domain::{User, UserFilter, UserId};
pub use error::AppError;
