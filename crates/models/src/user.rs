use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, ModelTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const ENTITY: &str = "user";

/// All users, in whatever order the store returns them.
pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(|e| ModelError::from_db(ENTITY, e))
}

pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::from_db(ENTITY, e))
}

/// First user whose email matches exactly.
pub async fn get_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::from_db(ENTITY, e))
}

/// Insert a new row; the store assigns `id`.
pub async fn create(db: &DatabaseConnection, record: ActiveModel) -> Result<Model, ModelError> {
    record.insert(db).await.map_err(|e| ModelError::from_db(ENTITY, e))
}

/// Persist field changes already applied to a fetched record.
pub async fn update(db: &DatabaseConnection, record: ActiveModel) -> Result<Model, ModelError> {
    record.update(db).await.map_err(|e| ModelError::from_db(ENTITY, e))
}

pub async fn delete(db: &DatabaseConnection, record: Model) -> Result<(), ModelError> {
    let res = record.delete(db).await.map_err(|e| ModelError::from_db(ENTITY, e))?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound(format!("{} not found", ENTITY)));
    }
    Ok(())
}
