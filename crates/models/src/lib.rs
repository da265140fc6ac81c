//! Persisted entities and their data-access functions.
//!
//! Each entity module owns the SeaORM definition plus the repository calls
//! (`get_all`, `get_by_id`, `create`, `update`, `delete`) that the service
//! layer builds on. Every call commits on its own.

pub mod errors;
pub mod db;
pub mod user;
pub mod product;
