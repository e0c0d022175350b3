//! Blackboard key registry.
//!
//! Every key the tree shares lives here so producer/consumer pairs are easy
//! to audit; ids must stay unique across this module.

use sandpiper_bt::BbKey;
use sandpiper_hal::{Detection, Frame};

/// Closest obstacle distance this tick, centimetres.
pub const DISTANCE_CM: BbKey<f32> = BbKey::new(0x10, "distance_cm");

/// Collision strategy verdict over the full sensor array.
pub const ABOUT_TO_COLLIDE: BbKey<bool> = BbKey::new(0x11, "about_to_collide");

/// IMU stuck-detection verdict.
pub const IS_STUCK: BbKey<bool> = BbKey::new(0x12, "is_stuck");

/// Latest captured camera frame. Left unset on a dropped frame.
pub const FRAME: BbKey<Frame> = BbKey::new(0x13, "current_frame");

/// Best can detection for the latest frame; `None` when nothing was seen or
/// after a can was collected.
pub const DETECTION: BbKey<Option<Detection>> = BbKey::new(0x14, "detection");

/// Water-boundary verdict for the latest frame.
pub const NEAR_WATER: BbKey<bool> = BbKey::new(0x15, "near_water");

/// Number of cans collected since startup.
pub const CANS_IN_TRAY: BbKey<u32> = BbKey::new(0x16, "cans_in_tray");
