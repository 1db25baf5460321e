//! # devinv-core — Foundational Types for the Device Inventory
//!
//! Every other crate in the workspace depends on `devinv-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `DeviceId` wraps the store-assigned integer so
//!    it cannot be confused with any other number flowing through a handler.
//!
//! 2. **Persisted vs. unsaved records.** `NewDevice` has no id and no creation
//!    time; `Device` always has both. A persisted record lacking a field is
//!    not representable.
//!
//! 3. **Sparse patches.** `DevicePatch` holds one `Option` per mutable field.
//!    `None` means "leave unchanged" and is distinct from a present-but-blank
//!    value.
//!
//! 4. **Injected persistence.** The lifecycle engine only ever sees the
//!    [`DeviceStore`] trait.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `devinv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod device;
pub mod error;
pub mod identity;
pub mod store;

pub use device::{Device, DevicePatch, DeviceState, NewDevice};
pub use error::{LifecycleError, StateParseError, StoreError};
pub use identity::DeviceId;
pub use store::DeviceStore;

#[cfg(any(test, feature = "testing"))]
pub use store::MockDeviceStore;
