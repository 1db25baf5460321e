//! # Device Identifier
//!
//! The store assigns identifiers on first save; callers never mint them.
//! Wrapping the raw integer keeps a device id from being passed where any
//! other number is expected.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub i64);

impl DeviceId {
    /// Access the raw integer value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
