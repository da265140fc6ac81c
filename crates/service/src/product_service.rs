use sea_orm::{DatabaseConnection, Set};
use tracing::instrument;

use models::{errors::ModelError, product};
use crate::{dto::ProductDto, errors::ServiceError};

/// List every product.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    Ok(product::get_all(db).await?)
}

/// Get a product by id as a full DTO (picture included).
pub async fn get_product_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<ProductDto>, ServiceError> {
    let found = product::get_by_id(db, id).await?;
    Ok(found.map(ProductDto::from))
}

/// Create a product. `picture` is only ever set by upload or full update.
#[instrument(skip(db))]
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    description: Option<&str>,
) -> Result<product::Model, ServiceError> {
    let am = product::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        picture: Set(None),
        description: Set(description.map(str::to_string)),
        ..Default::default()
    };
    Ok(product::create(db, am).await?)
}

/// Overwrite name, price, picture and description together.
#[instrument(skip(db))]
pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    price: f64,
    picture: Option<&str>,
    description: Option<&str>,
) -> Result<Option<product::Model>, ServiceError> {
    let Some(found) = product::get_by_id(db, id).await? else { return Ok(None) };
    let mut am: product::ActiveModel = found.into();
    am.name = Set(name.to_string());
    am.price = Set(price);
    am.picture = Set(picture.map(str::to_string));
    am.description = Set(description.map(str::to_string));
    persist(db, am).await
}

/// Replace only the picture path.
#[instrument(skip(db))]
pub async fn update_product_picture(
    db: &DatabaseConnection,
    id: i32,
    file_path: &str,
) -> Result<Option<product::Model>, ServiceError> {
    let Some(found) = product::get_by_id(db, id).await? else { return Ok(None) };
    let mut am: product::ActiveModel = found.into();
    am.picture = Set(Some(file_path.to_string()));
    persist(db, am).await
}

/// Delete a product; `false` when no such id.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let Some(found) = product::get_by_id(db, id).await? else { return Ok(false) };
    match product::delete(db, found).await {
        Ok(()) => Ok(true),
        Err(ModelError::NotFound(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn persist(db: &DatabaseConnection, am: product::ActiveModel) -> Result<Option<product::Model>, ServiceError> {
    match product::update(db, am).await {
        Ok(updated) => Ok(Some(updated)),
        Err(ModelError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
