//! Service layer providing business-oriented CRUD operations on top of models.
//! - Stateless free functions; every call takes the database handle explicitly.
//! - Converts persisted models into wire DTOs.
//! - Owns the email format rule and the image upload file handling.

pub mod errors;
pub mod dto;
pub mod user_service;
pub mod product_service;
pub mod storage;
#[cfg(test)]
pub mod test_support;
