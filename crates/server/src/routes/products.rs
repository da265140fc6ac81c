use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use common::types::Message;
use service::{
    dto::{ProductDto, ProductSummaryDto},
    product_service,
    storage::{self, UploadRejection},
};

use crate::{
    errors::{resolve_id, JsonApiError},
    state::ServerState,
};

const NOT_FOUND: &str = "Product not found";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductInput {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full replacement: omitted `picture`/`description` are stored as null.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductInput {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[utoipa::path(
    get, path = "/products/", tag = "products",
    responses((status = 200, description = "A list of products", body = [ProductSummaryDto]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ProductSummaryDto>>, JsonApiError> {
    let products = product_service::get_all_products(&state.db).await?;
    Ok(Json(products.into_iter().map(ProductSummaryDto::from).collect()))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "ID of the product")),
    responses(
        (status = 200, description = "A product", body = ProductDto),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn get(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<ProductDto>, JsonApiError> {
    let id = resolve_id(id, NOT_FOUND)?;
    product_service::get_product_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(NOT_FOUND))
}

#[utoipa::path(
    post, path = "/products/", tag = "products",
    request_body = CreateProductInput,
    responses(
        (status = 201, description = "Product created successfully", body = ProductSummaryDto),
        (status = 400, description = "Malformed body", body = crate::openapi::MessageResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductSummaryDto>), JsonApiError> {
    let Json(input) = payload?;
    let product = product_service::create_product(&state.db, &input.name, input.price, input.description.as_deref()).await?;
    info!(id = product.id, "created product");
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "ID of the product")),
    request_body = UpdateProductInput,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductSummaryDto),
        (status = 400, description = "Malformed body", body = crate::openapi::MessageResponse),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateProductInput>, JsonRejection>,
) -> Result<Json<ProductSummaryDto>, JsonApiError> {
    let id = resolve_id(id, NOT_FOUND)?;
    let Json(input) = payload?;
    let updated = product_service::update_product(
        &state.db,
        id,
        &input.name,
        input.price,
        input.picture.as_deref(),
        input.description.as_deref(),
    )
    .await?;
    match updated {
        Some(p) => {
            info!(id = p.id, "updated product");
            Ok(Json(p.into()))
        }
        None => Err(JsonApiError::not_found(NOT_FOUND)),
    }
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "ID of the product")),
    responses(
        (status = 200, description = "Product deleted successfully", body = crate::openapi::MessageResponse),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn delete(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<Message>, JsonApiError> {
    let id = resolve_id(id, NOT_FOUND)?;
    if product_service::delete_product(&state.db, id).await? {
        info!(id, "deleted product");
        Ok(Json(Message::new("Product deleted")))
    } else {
        Err(JsonApiError::not_found(NOT_FOUND))
    }
}

/// Save the `image` part under the upload directory and record its path as
/// the product's picture. File write and row update are separate commits.
#[utoipa::path(
    post, path = "/products/{id}/upload_image", tag = "products",
    params(("id" = i32, Path, description = "ID of the product")),
    request_body(content = crate::openapi::UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image uploaded successfully", body = crate::openapi::MessageResponse),
        (status = 400, description = "Missing or invalid image", body = crate::openapi::MessageResponse),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn upload_image(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let id = resolve_id(id, NOT_FOUND)?;
    if product_service::get_product_by_id(&state.db, id).await?.is_none() {
        return Err(JsonApiError::not_found(NOT_FOUND));
    }

    let Ok(mut multipart) = multipart else {
        return Err(rejected(UploadRejection::NoImagePart));
    };

    // First part named `image` that carries a filename; plain form fields are skipped.
    let (raw_name, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(rejected(UploadRejection::NoImagePart)),
            Err(e) => return Err(JsonApiError::new(e.status(), e.body_text())),
        };
        if field.name() != Some("image") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else { continue };
        let data = field
            .bytes()
            .await
            .map_err(|e| JsonApiError::new(e.status(), e.body_text()))?;
        break (file_name, data);
    };

    let filename = storage::accept_image_filename(&raw_name).map_err(|r| {
        warn!(product_id = id, file_name = %raw_name, reason = %r, "image upload rejected");
        rejected(r)
    })?;

    let path = storage::save_upload(&state.upload_dir, &filename, &data).await?;
    let picture = path.to_string_lossy().into_owned();

    match product_service::update_product_picture(&state.db, id, &picture).await? {
        Some(_) => {
            info!(product_id = id, %picture, bytes = data.len(), "product image uploaded");
            Ok((StatusCode::CREATED, Json(Message::new("Image uploaded successfully"))))
        }
        // deleted while the file was being written
        None => Err(JsonApiError::not_found(NOT_FOUND)),
    }
}

fn rejected(reason: UploadRejection) -> JsonApiError {
    JsonApiError::bad_request(reason.to_string())
}
