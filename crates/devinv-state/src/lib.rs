//! # devinv-state — Device Lifecycle Engine
//!
//! Decides, for every mutation request, whether it is legal given the
//! device's current state, and merges sparse updates into the stored record.
//!
//! ## Modules
//!
//! - **Guards** (`lifecycle.rs`): pure functions over a device and a
//!   requested change. No I/O, independently testable.
//!
//! - **Engine** (`engine.rs`): `DeviceLifecycle`, which loads from the store
//!   gateway, runs the guards, and persists the result.
//!
//! - **Memory store** (`memory.rs`): `MemoryDeviceStore`, the in-process
//!   implementation of [`devinv_core::DeviceStore`].
//!
//! ## Design
//!
//! The state set is small and every state may reach every other, so states
//! are a closed enum with runtime guards rather than typestates. What the
//! guards restrict is not *which* transitions happen but *what else* may
//! change alongside them: an `IN_USE` device keeps its name and brand and
//! cannot be deleted.
//!
//! The engine holds no mutable state of its own. Updates are
//! load → validate → save with no version check; two concurrent updates to
//! the same device can overwrite each other.

pub mod engine;
pub mod lifecycle;
pub mod memory;

pub use engine::DeviceLifecycle;
pub use lifecycle::{
    apply_patch, check_delete, check_update, is_blank, IN_USE_DELETE, IN_USE_IDENTITY_CHANGE,
};
pub use memory::MemoryDeviceStore;
