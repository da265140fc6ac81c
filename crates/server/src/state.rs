use std::path::PathBuf;

use sea_orm::DatabaseConnection;

/// Shared handler state. The database handle is passed explicitly into every
/// service call; nothing else is kept between requests.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, upload: &configs::UploadConfig) -> Self {
        Self { db, upload_dir: PathBuf::from(&upload.dir), max_upload_bytes: upload.max_bytes }
    }
}
