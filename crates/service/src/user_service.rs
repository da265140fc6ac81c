use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{DatabaseConnection, Set};
use tracing::instrument;

use models::{errors::ModelError, user};
use crate::errors::ServiceError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern compiles"));

/// List every user.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    Ok(user::get_all(db).await?)
}

/// Get a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<user::Model>, ServiceError> {
    Ok(user::get_by_id(db, id).await?)
}

/// Look a user up by email. A malformed address short-circuits to `None`
/// without touching the store.
pub async fn get_user_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>, ServiceError> {
    if !is_valid_email(email) {
        return Ok(None);
    }
    Ok(user::get_by_email(db, email).await?)
}

/// `local@domain.tld` shape check; not RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Persist a new user. Uniqueness and length rules are checked by the caller.
#[instrument(skip(db))]
pub async fn create_user(db: &DatabaseConnection, name: &str, email: &str) -> Result<user::Model, ServiceError> {
    let am = user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        ..Default::default()
    };
    Ok(user::create(db, am).await?)
}

/// Overwrite name and email. No format, length or uniqueness re-check.
#[instrument(skip(db))]
pub async fn update_user(db: &DatabaseConnection, id: i32, name: &str, email: &str) -> Result<Option<user::Model>, ServiceError> {
    let Some(found) = user::get_by_id(db, id).await? else { return Ok(None) };
    let mut am: user::ActiveModel = found.into();
    am.name = Set(name.to_string());
    am.email = Set(email.to_string());
    match user::update(db, am).await {
        Ok(updated) => Ok(Some(updated)),
        Err(ModelError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete a user; `false` when no such id.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let Some(found) = user::get_by_id(db, id).await? else { return Ok(false) };
    match user::delete(db, found).await {
        Ok(()) => Ok(true),
        Err(ModelError::NotFound(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
