use utoipa::OpenApi;
use utoipa::ToSchema;

use service::dto::{ProductDto, ProductSummaryDto, UserDto};

use crate::routes::{products, users};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct UploadImageForm {
    /// Image file to upload (png, jpg, jpeg or gif)
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "adminapp", description = "Users and products administration API"),
    paths(
        crate::routes::health,
        crate::routes::users::list,
        crate::routes::users::get,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::products::upload_image,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            UploadImageForm,
            UserDto,
            ProductDto,
            ProductSummaryDto,
            users::CreateUserInput,
            users::UpdateUserInput,
            products::CreateProductInput,
            products::UpdateProductInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "products")
    )
)]
pub struct ApiDoc;
