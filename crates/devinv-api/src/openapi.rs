//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented device routes into a single OpenAPI
//! spec, served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the device API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Device Inventory API",
        version = "0.1.0",
        description = "Registers devices, tracks their lifecycle state, and guards identity changes and deletion while a device is in use.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::devices::create_device,
        crate::routes::devices::update_device,
        crate::routes::devices::get_device,
        crate::routes::devices::list_devices,
        crate::routes::devices::list_devices_by_brand,
        crate::routes::devices::list_devices_by_state,
        crate::routes::devices::delete_device,
    ),
    components(schemas(
        crate::routes::devices::CreateDeviceRequest,
        crate::routes::devices::UpdateDeviceRequest,
        crate::routes::devices::DeviceResponse,
        crate::error::ErrorBody,
        crate::error::FieldError,
    )),
    tags(
        (name = "devices", description = "Handles all device operations such as creation, retrieval, update, and deletion"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
