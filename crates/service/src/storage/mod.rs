//! Storage helpers for the service layer
//!
//! Uploaded product images are written to a plain directory; only the
//! resulting path is persisted on the product row.

pub mod upload;

pub use upload::{accept_image_filename, allowed_file, save_upload, secure_filename, UploadRejection};
