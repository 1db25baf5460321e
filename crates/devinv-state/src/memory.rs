//! # In-Memory Device Store
//!
//! A [`DeviceStore`] backed by a `BTreeMap` behind a `parking_lot::RwLock`.
//! Used when no database is configured and throughout the test suites.
//!
//! The lock is never held across an `.await`, so a synchronous lock is
//! sufficient. `parking_lot::RwLock` does not poison: a panicking writer
//! leaves the map usable.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use devinv_core::{Device, DeviceId, DeviceState, DeviceStore, NewDevice, StoreError};
use parking_lot::RwLock;

#[derive(Debug)]
struct Inner {
    devices: RwLock<BTreeMap<DeviceId, Device>>,
    next_id: AtomicI64,
}

/// Thread-safe, cloneable in-memory device store.
///
/// Ids are allocated from 1 upward and never reused. Clones share the same
/// underlying map.
#[derive(Debug, Clone)]
pub struct MemoryDeviceStore {
    inner: Arc<Inner>,
}

impl MemoryDeviceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                devices: RwLock::new(BTreeMap::new()),
                next_id: AtomicI64::new(1),
            }),
        }
    }

    /// Number of stored devices.
    pub fn len(&self) -> usize {
        self.inner.devices.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn filtered(&self, keep: impl Fn(&Device) -> bool) -> Vec<Device> {
        self.inner
            .devices
            .read()
            .values()
            .filter(|d| keep(*d))
            .cloned()
            .collect()
    }
}

impl Default for MemoryDeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceStore for MemoryDeviceStore {
    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, StoreError> {
        Ok(self.inner.devices.read().get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Device>, StoreError> {
        Ok(self.filtered(|_| true))
    }

    async fn list_by_brand(&self, brand: &str) -> Result<Vec<Device>, StoreError> {
        Ok(self.filtered(|d| d.brand == brand))
    }

    async fn list_by_state(&self, state: DeviceState) -> Result<Vec<Device>, StoreError> {
        Ok(self.filtered(|d| d.state == state))
    }

    async fn create(&self, device: NewDevice) -> Result<Device, StoreError> {
        let id = DeviceId(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let device = device.into_device(id, Utc::now());
        self.inner.devices.write().insert(id, device.clone());
        Ok(device)
    }

    async fn save(&self, mut device: Device) -> Result<Device, StoreError> {
        let mut guard = self.inner.devices.write();
        if let Some(existing) = guard.get(&device.id) {
            device.created_at = existing.created_at;
        }
        self.inner
            .next_id
            .fetch_max(device.id.get().saturating_add(1), Ordering::SeqCst);
        guard.insert(device.id, device.clone());
        Ok(device)
    }

    async fn delete(&self, id: DeviceId) -> Result<(), StoreError> {
        self.inner.devices.write().remove(&id);
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
