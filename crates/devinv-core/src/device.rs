//! # Device Records
//!
//! The inventory entity, its lifecycle state, and the shapes used to create
//! and partially update it.
//!
//! ## States
//!
//! ```text
//! AVAILABLE ◀──▶ IN_USE ◀──▶ INACTIVE
//!     ▲                         │
//!     └─────────────────────────┘
//! ```
//!
//! Any state may move to any other through an update. `IN_USE` freezes the
//! device's identity (name and brand) and blocks deletion; the guards live in
//! `devinv-state`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::StateParseError;
use crate::identity::DeviceId;

// ─── Device State ────────────────────────────────────────────────────

/// Lifecycle state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceState {
    /// Free to be assigned.
    Available,
    /// Assigned and in active use. Name and brand are frozen.
    InUse,
    /// Retired from circulation but still on record.
    Inactive,
}

impl DeviceState {
    /// Every state, in declaration order.
    pub const ALL: [DeviceState; 3] = [Self::Available, Self::InUse, Self::Inactive];

    /// Return the wire name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::InUse => "IN_USE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Whether the device is in active use.
    pub fn is_in_use(&self) -> bool {
        matches!(self, Self::InUse)
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceState {
    type Err = StateParseError;

    /// Parse a state from its wire name. Matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "IN_USE" => Ok(Self::InUse),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(StateParseError(other.to_string())),
        }
    }
}

// ─── Records ─────────────────────────────────────────────────────────

/// A persisted device.
///
/// `id` and `created_at` are assigned by the store on first save and never
/// change afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Store-assigned identifier.
    pub id: DeviceId,
    /// Human-readable label.
    pub name: String,
    /// Manufacturer label.
    pub brand: String,
    /// Current lifecycle state.
    pub state: DeviceState,
    /// When the store first persisted the device.
    pub created_at: DateTime<Utc>,
}

/// A device that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub brand: String,
    pub state: DeviceState,
}

impl NewDevice {
    pub fn new(name: impl Into<String>, brand: impl Into<String>, state: DeviceState) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            state,
        }
    }

    /// Materialize the persisted form once the store has allocated an id and
    /// a creation time.
    pub fn into_device(self, id: DeviceId, created_at: DateTime<Utc>) -> Device {
        Device {
            id,
            name: self.name,
            brand: self.brand,
            state: self.state,
            created_at,
        }
    }
}

/// Sparse update for a device.
///
/// Each field is independent: `None` leaves the stored value untouched,
/// `Some` requests a new value. A `Some("")` is a request to blank the field
/// and is rejected by the lifecycle guards, never treated as "no change".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<DeviceState>,
}

impl DevicePatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
