//! # Error Types — Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`.
//!
//! ## Design
//!
//! - Store failures are opaque to the lifecycle engine and always propagate.
//! - Lifecycle rejections carry the device id or the offending field so the
//!   transport can render a precise message.

use thiserror::Error;

use crate::identity::DeviceId;

/// Failure reported by a [`DeviceStore`](crate::DeviceStore) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not complete the operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored row could not be mapped back to a device.
    #[error("corrupt device record {id}: {reason}")]
    Corrupt {
        /// Identifier of the offending row.
        id: DeviceId,
        /// What was wrong with it.
        reason: String,
    },
}

/// A state name outside `AVAILABLE`, `IN_USE`, `INACTIVE`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown device state: {0:?}")]
pub struct StateParseError(pub String);

/// Rejection or failure raised by the device lifecycle engine.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// No device exists with the given id.
    #[error("Device not found with id: {0}")]
    NotFound(DeviceId),

    /// A supplied field value is malformed (e.g. present but blank).
    #[error("{message}")]
    InvalidArgument {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },

    /// An identity change was requested while the device is in use.
    #[error("{0}")]
    IllegalState(String),

    /// An operation is not permitted in the device's current state.
    #[error("{0}")]
    IllegalOperation(String),

    /// The store gateway failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl LifecycleError {
    /// Build the blank-field rejection for `field`.
    pub fn blank(field: &'static str) -> Self {
        Self::InvalidArgument {
            field,
            message: format!("{field} cannot be blank"),
        }
    }
}
