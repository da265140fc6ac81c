//! Wire shapes for users and products.
//!
//! DTOs are built from a model returned by the store in the same request and
//! are never cached, so they always mirror the persisted row.

use models::{product, user};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<user::Model> for UserDto {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, name: u.name, email: u.email }
    }
}

/// Full product view, including the uploaded picture path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub picture: Option<String>,
    pub description: Option<String>,
}

impl From<product::Model> for ProductDto {
    fn from(p: product::Model) -> Self {
        Self { id: p.id, name: p.name, price: p.price, picture: p.picture, description: p.description }
    }
}

/// Product view used by list/create/update responses; omits `picture`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummaryDto {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

impl From<product::Model> for ProductSummaryDto {
    fn from(p: product::Model) -> Self {
        Self { id: p.id, name: p.name, price: p.price, description: p.description }
    }
}
