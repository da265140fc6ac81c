use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Map a SeaORM error, treating "row vanished before update" as not found.
    pub fn from_db(entity: &str, e: DbErr) -> Self {
        match e {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => Self::NotFound(format!("{} not found", entity)),
            other => Self::Db(other.to_string()),
        }
    }
}
