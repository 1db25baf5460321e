//! # Lifecycle Engine
//!
//! `DeviceLifecycle` is the orchestration layer the HTTP handlers call. It
//! loads devices through the injected [`DeviceStore`], runs the pure guards
//! from [`crate::lifecycle`], and persists the outcome.

use std::sync::Arc;

use devinv_core::{
    Device, DeviceId, DevicePatch, DeviceState, DeviceStore, LifecycleError, NewDevice,
};
use tracing::{debug, error, info, warn};

use crate::lifecycle::{apply_patch, check_delete, check_update};

/// Device lifecycle engine.
///
/// Stateless between calls: cloning shares the same store.
#[derive(Clone)]
pub struct DeviceLifecycle {
    store: Arc<dyn DeviceStore>,
}

impl std::fmt::Debug for DeviceLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceLifecycle").finish_non_exhaustive()
    }
}

impl DeviceLifecycle {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    /// Persist a new device. Field validation happens at the transport.
    pub async fn create(&self, device: NewDevice) -> Result<Device, LifecycleError> {
        debug!(name = %device.name, brand = %device.brand, state = %device.state, "Creating device");

        let created = self.store.create(device).await.map_err(|e| {
            error!(error = %e, "Failed to create device");
            e
        })?;

        info!(device_id = %created.id, state = %created.state, "Device created");
        Ok(created)
    }

    /// Apply a sparse update to an existing device.
    pub async fn update(&self, id: DeviceId, patch: DevicePatch) -> Result<Device, LifecycleError> {
        debug!(device_id = %id, ?patch, "Updating device");

        let mut device = self.load(id).await?;

        if let Err(rejection) = check_update(&device, &patch) {
            warn!(device_id = %id, state = %device.state, reason = %rejection, "Update rejected");
            return Err(rejection);
        }

        apply_patch(&mut device, patch);

        let saved = self.store.save(device).await.map_err(|e| {
            error!(device_id = %id, error = %e, "Failed to save device");
            e
        })?;

        info!(device_id = %saved.id, state = %saved.state, "Device updated");
        Ok(saved)
    }

    /// Look up a single device.
    pub async fn find_by_id(&self, id: DeviceId) -> Result<Device, LifecycleError> {
        debug!(device_id = %id, "Getting device");
        self.load(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Device>, LifecycleError> {
        debug!("Listing devices");
        let devices = self.store.list_all().await?;
        debug!(count = devices.len(), "Listed devices");
        Ok(devices)
    }

    pub async fn list_by_brand(&self, brand: &str) -> Result<Vec<Device>, LifecycleError> {
        debug!(brand, "Listing devices by brand");
        let devices = self.store.list_by_brand(brand).await?;
        debug!(brand, count = devices.len(), "Listed devices by brand");
        Ok(devices)
    }

    pub async fn list_by_state(&self, state: DeviceState) -> Result<Vec<Device>, LifecycleError> {
        debug!(%state, "Listing devices by state");
        let devices = self.store.list_by_state(state).await?;
        debug!(%state, count = devices.len(), "Listed devices by state");
        Ok(devices)
    }

    /// Delete a device unless it is in use.
    pub async fn delete(&self, id: DeviceId) -> Result<(), LifecycleError> {
        debug!(device_id = %id, "Deleting device");

        let device = self.load(id).await?;

        if let Err(rejection) = check_delete(&device) {
            warn!(device_id = %id, reason = %rejection, "Delete rejected");
            return Err(rejection);
        }

        self.store.delete(id).await.map_err(|e| {
            error!(device_id = %id, error = %e, "Failed to delete device");
            e
        })?;

        info!(device_id = %id, "Device deleted");
        Ok(())
    }

    async fn load(&self, id: DeviceId) -> Result<Device, LifecycleError> {
        match self.store.get_by_id(id).await {
            Ok(Some(device)) => Ok(device),
            Ok(None) => {
                debug!(device_id = %id, "Device not found");
                Err(LifecycleError::NotFound(id))
            }
            Err(e) => {
                error!(device_id = %id, error = %e, "Failed to load device");
                Err(e.into())
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
