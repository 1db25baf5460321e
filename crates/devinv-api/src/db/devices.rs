//! Device persistence operations.
//!
//! [`PgDeviceStore`] implements the store gateway over the `devices` table.
//! Lifecycle rules are enforced by the engine, not in SQL; the table only
//! constrains `state` to the known wire names.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devinv_core::{Device, DeviceId, DeviceState, DeviceStore, NewDevice, StoreError};
use sqlx::PgPool;

/// Postgres-backed device store.
#[derive(Debug, Clone)]
pub struct PgDeviceStore {
    pool: PgPool,
}

impl PgDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_devices(rows: Vec<DeviceRow>) -> Result<Vec<Device>, StoreError> {
    rows.into_iter().map(DeviceRow::into_device).collect()
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl DeviceStore for PgDeviceStore {
    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, StoreError> {
        let row = sqlx::query_as::<_, DeviceRow>(
            "SELECT id, name, brand, state, creation_time FROM devices WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(DeviceRow::into_device).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Device>, StoreError> {
        let rows = sqlx::query_as::<_, DeviceRow>(
            "SELECT id, name, brand, state, creation_time FROM devices ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        into_devices(rows)
    }

    async fn list_by_brand(&self, brand: &str) -> Result<Vec<Device>, StoreError> {
        let rows = sqlx::query_as::<_, DeviceRow>(
            "SELECT id, name, brand, state, creation_time FROM devices
             WHERE brand = $1 ORDER BY id",
        )
        .bind(brand)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        into_devices(rows)
    }

    async fn list_by_state(&self, state: DeviceState) -> Result<Vec<Device>, StoreError> {
        let rows = sqlx::query_as::<_, DeviceRow>(
            "SELECT id, name, brand, state, creation_time FROM devices
             WHERE state = $1 ORDER BY id",
        )
        .bind(state.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        into_devices(rows)
    }

    async fn create(&self, device: NewDevice) -> Result<Device, StoreError> {
        let row = sqlx::query_as::<_, DeviceRow>(
            "INSERT INTO devices (name, brand, state) VALUES ($1, $2, $3)
             RETURNING id, name, brand, state, creation_time",
        )
        .bind(&device.name)
        .bind(&device.brand)
        .bind(device.state.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row.into_device()
    }

    async fn save(&self, device: Device) -> Result<Device, StoreError> {
        let row = sqlx::query_as::<_, DeviceRow>(
            "INSERT INTO devices (id, name, brand, state, creation_time)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name, brand = EXCLUDED.brand, state = EXCLUDED.state
             RETURNING id, name, brand, state, creation_time",
        )
        .bind(device.id.get())
        .bind(&device.name)
        .bind(&device.brand)
        .bind(device.state.as_str())
        .bind(device.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row.into_device()
    }

    async fn delete(&self, id: DeviceId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

/// Internal row type for SQLx mapping.
#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    id: i64,
    name: String,
    brand: String,
    state: String,
    creation_time: DateTime<Utc>,
}

impl DeviceRow {
    fn into_device(self) -> Result<Device, StoreError> {
        let id = DeviceId(self.id);
        let state = self
            .state
            .parse::<DeviceState>()
            .map_err(|e| StoreError::Corrupt {
                id,
                reason: e.to_string(),
            })?;

        Ok(Device {
            id,
            name: self.name,
            brand: self.brand,
            state,
            created_at: self.creation_time,
        })
    }
}
