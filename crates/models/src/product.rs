use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, ModelTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    /// Path of the last uploaded image, if any.
    pub picture: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const ENTITY: &str = "product";

pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(|e| ModelError::from_db(ENTITY, e))
}

pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::from_db(ENTITY, e))
}

pub async fn create(db: &DatabaseConnection, record: ActiveModel) -> Result<Model, ModelError> {
    record.insert(db).await.map_err(|e| ModelError::from_db(ENTITY, e))
}

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
