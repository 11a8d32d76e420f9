//! Distances and angles used by contact detection, knob classification and orientation
pub mod core;
