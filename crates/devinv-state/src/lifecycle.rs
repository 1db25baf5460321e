//! # Lifecycle Guards
//!
//! Pure decision functions for device mutations.
//!
//! ## Update Algorithm
//!
//! ```text
//! effective(field) = patch.field if present else current.field
//!
//! 1. current.state == IN_USE and effective(name|brand) != current(name|brand)
//!        → IllegalState
//! 2. patch.name present and blank  → InvalidArgument(name)
//!    patch.brand present and blank → InvalidArgument(brand)
//! 3. state  ← patch.state if present
//! 4. if state != IN_USE: name/brand ← patch values that are present
//! ```
//!
//! Step 1 reads the state *before* the patch is applied. A single request
//! that releases a device and renames it is still rejected: the release does
//! not unlock the rename within the same request.
//!
//! Step 4 reads the state *after* step 3. A request that moves a device into
//! `IN_USE` leaves name and brand untouched even when it supplies new values.

use devinv_core::{Device, DevicePatch, LifecycleError};

/// Rejection message for a name/brand change on an in-use device.
pub const IN_USE_IDENTITY_CHANGE: &str = "Cannot update name or brand when device is IN_USE";

/// Rejection message for deleting an in-use device.
pub const IN_USE_DELETE: &str = "Cannot delete device when state is IN_USE";

/// Whether `value` is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Decide whether `patch` may be applied to `current`.
pub fn check_update(current: &Device, patch: &DevicePatch) -> Result<(), LifecycleError> {
    let effective_name = patch.name.as_deref().unwrap_or(&current.name);
    let effective_brand = patch.brand.as_deref().unwrap_or(&current.brand);

    if current.state.is_in_use()
        && (effective_name != current.name || effective_brand != current.brand)
    {
        return Err(LifecycleError::IllegalState(
            IN_USE_IDENTITY_CHANGE.to_string(),
        ));
    }

    if patch.name.as_deref().is_some_and(is_blank) {
        return Err(LifecycleError::blank("name"));
    }
    if patch.brand.as_deref().is_some_and(is_blank) {
        return Err(LifecycleError::blank("brand"));
    }

    Ok(())
}

/// Merge `patch` into `device`. Call only after [`check_update`] accepted it.
pub fn apply_patch(device: &mut Device, patch: DevicePatch) {
    if let Some(state) = patch.state {
        device.state = state;
    }

    if !device.state.is_in_use() {
        if let Some(name) = patch.name {
            device.name = name;
        }
        if let Some(brand) = patch.brand {
            device.brand = brand;
        }
    }
}

/// Decide whether `device` may be deleted.
pub fn check_delete(device: &Device) -> Result<(), LifecycleError> {
    if device.state.is_in_use() {
        return Err(LifecycleError::IllegalOperation(IN_USE_DELETE.to_string()));
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────
