//! # API Route Modules
//!
//! - `devices`: device CRUD and filtered listings over the lifecycle engine.

pub mod devices;
