//! # Store Gateway
//!
//! The persistence contract the lifecycle engine depends on. Implementations
//! live next to their backends (in-memory in `devinv-state`, Postgres in
//! `devinv-api`); the engine only ever holds an `Arc<dyn DeviceStore>`.

use async_trait::async_trait;

use crate::device::{Device, DeviceState, NewDevice};
use crate::error::StoreError;
use crate::identity::DeviceId;

/// Persistence operations for devices.
///
/// Listing operations return devices in ascending id order.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Look up a device by id.
    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, StoreError>;

    /// Every device in the store.
    async fn list_all(&self) -> Result<Vec<Device>, StoreError>;

    /// Devices whose brand matches exactly.
    async fn list_by_brand(&self, brand: &str) -> Result<Vec<Device>, StoreError>;

    /// Devices currently in `state`.
    async fn list_by_state(&self, state: DeviceState) -> Result<Vec<Device>, StoreError>;

    /// First save: allocate an id and stamp the creation time.
    async fn create(&self, device: NewDevice) -> Result<Device, StoreError>;

    /// Upsert an existing device. Never alters the stored creation time.
    async fn save(&self, device: Device) -> Result<Device, StoreError>;

    /// Remove a device.
    async fn delete(&self, id: DeviceId) -> Result<(), StoreError>;
}
