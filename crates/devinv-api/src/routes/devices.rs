//! # Devices API
//!
//! Handles device registration, sparse updates, lookups, filtered listings,
//! and deletion. Every mutation goes through
//! [`DeviceLifecycle`](devinv_state::DeviceLifecycle); handlers only translate
//! between HTTP and the engine.
//!
//! ## Endpoints
//!
//! - `POST /devices` — create device
//! - `GET /devices` — list devices
//! - `GET /devices/{id}` — get device
//! - `PUT /devices/{id}` — update device
//! - `DELETE /devices/{id}` — delete device
//! - `GET /devices/brand/{brand}` — list devices by brand
//! - `GET /devices/state/{state}` — list devices by state

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use devinv_core::{Device, DeviceId, DevicePatch, DeviceState, NewDevice};
use devinv_state::is_blank;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, FieldError};
use crate::extractors::{extract_path, extract_validated_json};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to register a new device.
///
/// Every field is required. Missing or blank fields are reported together.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Tablet", "brand": "Apple", "state": "AVAILABLE"}))]
pub struct CreateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    /// One of `AVAILABLE`, `IN_USE`, `INACTIVE`.
    #[schema(example = "AVAILABLE")]
    pub state: Option<String>,
}

impl TryFrom<CreateDeviceRequest> for NewDevice {
    type Error = AppError;

    fn try_from(req: CreateDeviceRequest) -> Result<Self, Self::Error> {
        // An unknown state makes the body unreadable; field checks come after.
        let state = parse_state_field(req.state)?;

        let mut errors = Vec::new();
        for (field, value) in [("name", &req.name), ("brand", &req.brand)] {
            if value.as_deref().map_or(true, is_blank) {
                errors.push(FieldError::new(field, "must not be blank"));
            }
        }
        if state.is_none() {
            errors.push(FieldError::new("state", "must not be null"));
        }

        match (req.name, req.brand, state) {
            (Some(name), Some(brand), Some(state)) if errors.is_empty() => {
                Ok(NewDevice::new(name, brand, state))
            }
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Sparse update. Omitted or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Tablet"}))]
pub struct UpdateDeviceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    #[schema(example = "IN_USE")]
    pub state: Option<String>,
}

impl TryFrom<UpdateDeviceRequest> for DevicePatch {
    type Error = AppError;

    fn try_from(req: UpdateDeviceRequest) -> Result<Self, Self::Error> {
        Ok(DevicePatch {
            name: req.name,
            brand: req.brand,
            state: parse_state_field(req.state)?,
        })
    }
}

/// Parse the `state` field of a request body, naming the rejected value.
fn parse_state_field(raw: Option<String>) -> Result<Option<DeviceState>, AppError> {
    raw.map(|value| {
        value.parse::<DeviceState>().map_err(|_| {
            AppError::InvalidBody(format!(
                "Invalid value for field 'state': '{value}'. Expected type: DeviceState"
            ))
        })
    })
    .transpose()
}

/// External projection of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    #[schema(value_type = String, example = "AVAILABLE")]
    pub state: DeviceState,
    pub creation_time: DateTime<Utc>,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id.get(),
            name: device.name,
            brand: device.brand,
            state: device.state,
            creation_time: device.created_at,
        }
    }
}

fn to_responses(devices: Vec<Device>) -> Json<Vec<DeviceResponse>> {
    Json(devices.into_iter().map(DeviceResponse::from).collect())
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the devices router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/devices", get(list_devices).post(create_device))
        .route(
            "/devices/{id}",
            get(get_device).put(update_device).delete(delete_device),
        )
        .route("/devices/brand/{brand}", get(list_devices_by_brand))
        .route("/devices/state/{state}", get(list_devices_by_state))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /devices — Register a new device.
#[utoipa::path(
    post,
    path = "/devices",
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Device successfully created", body = DeviceResponse,
            headers(("Location" = String, description = "Path of the created device"))),
        (status = 400, description = "Invalid input data", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub(crate) async fn create_device(
    State(state): State<AppState>,
    body: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let new_device: NewDevice = extract_validated_json(body)?;
    let device = state.lifecycle.create(new_device).await?;
    let location = format!("/devices/{}", device.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DeviceResponse::from(device)),
    ))
}

/// PUT /devices/{id} — Apply a sparse update.
#[utoipa::path(
    put,
    path = "/devices/{id}",
    params(("id" = i64, Path, description = "ID of the device to update")),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Device updated", body = DeviceResponse),
        (status = 400, description = "Blank field or malformed body", body = crate::error::ErrorBody),
        (status = 404, description = "Device not found", body = crate::error::ErrorBody),
        (status = 409, description = "Name or brand change while IN_USE", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub(crate) async fn update_device(
    State(state): State<AppState>,
    id: Result<Path<DeviceId>, PathRejection>,
    body: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> Result<Json<DeviceResponse>, AppError> {
    let id = extract_path(id)?;
    let patch: DevicePatch = extract_validated_json(body)?;
    let device = state.lifecycle.update(id, patch).await?;
    Ok(Json(device.into()))
}

/// GET /devices/{id} — Get a single device.
#[utoipa::path(
    get,
    path = "/devices/{id}",
    params(("id" = i64, Path, description = "ID of the device to retrieve")),
    responses(
        (status = 200, description = "Device found", body = DeviceResponse),
        (status = 404, description = "Device not found", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub(crate) async fn get_device(
    State(state): State<AppState>,
    id: Result<Path<DeviceId>, PathRejection>,
) -> Result<Json<DeviceResponse>, AppError> {
    let id = extract_path(id)?;
    let device = state.lifecycle.find_by_id(id).await?;
    Ok(Json(device.into()))
}

/// GET /devices — List all devices.
#[utoipa::path(
    get,
    path = "/devices",
    responses(
        (status = 200, description = "All registered devices", body = Vec<DeviceResponse>),
    ),
    tag = "devices"
)]
pub(crate) async fn list_devices(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceResponse>>, AppError> {
    Ok(to_responses(state.lifecycle.list_all().await?))
}

/// GET /devices/brand/{brand} — List devices with an exact brand match.
#[utoipa::path(
    get,
    path = "/devices/brand/{brand}",
    params(("brand" = String, Path, description = "Brand name to filter devices")),
    responses(
        (status = 200, description = "Devices of the brand", body = Vec<DeviceResponse>),
    ),
    tag = "devices"
)]
pub(crate) async fn list_devices_by_brand(
    State(state): State<AppState>,
    brand: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<DeviceResponse>>, AppError> {
    let brand = extract_path(brand)?;
    Ok(to_responses(state.lifecycle.list_by_brand(&brand).await?))
}

/// GET /devices/state/{state} — List devices in a state.
#[utoipa::path(
    get,
    path = "/devices/state/{state}",
    params(("state" = String, Path, description = "State to filter devices (AVAILABLE, IN_USE, INACTIVE)")),
    responses(
        (status = 200, description = "Devices in the state", body = Vec<DeviceResponse>),
        (status = 400, description = "Unknown state", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub(crate) async fn list_devices_by_state(
    State(state): State<AppState>,
    device_state: Result<Path<DeviceState>, PathRejection>,
) -> Result<Json<Vec<DeviceResponse>>, AppError> {
    let device_state = extract_path(device_state)?;
    Ok(to_responses(
        state.lifecycle.list_by_state(device_state).await?,
    ))
}

/// DELETE /devices/{id} — Delete a device that is not in use.
#[utoipa::path(
    delete,
    path = "/devices/{id}",
    params(("id" = i64, Path, description = "ID of the device to delete")),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 404, description = "Device not found", body = crate::error::ErrorBody),
        (status = 409, description = "Device is IN_USE", body = crate::error::ErrorBody),
    ),
    tag = "devices"
)]
pub(crate) async fn delete_device(
    State(state): State<AppState>,
    id: Result<Path<DeviceId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = extract_path(id)?;
    state.lifecycle.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
