//! Data access: parameterized queries over the SQLite pool, one module per
//! entity. Handlers never touch SQL directly.

pub mod follows;
pub mod likes;
pub mod movies;
pub mod reviews;
pub mod users;
