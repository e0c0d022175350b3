use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Top-level robot configuration, loaded from YAML. Every field has a
/// default so a partial file (or none at all) still yields a runnable tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Tick cadence of the decision loop, in hertz.
    pub tick_hz: u32,
    pub collision: CollisionConfig,
    pub stuck: StuckConfig,
    pub water: WaterConfig,
    pub cans: CansConfig,
    pub scan: ScanConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            tick_hz: 10,
            collision: CollisionConfig::default(),
            stuck: StuckConfig::default(),
            water: WaterConfig::default(),
            cans: CansConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl RobotConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Obstacle distance below which the crash branch takes over.
    pub threshold_cm: f32,
    /// Reverse speed while backing away from the obstacle.
    pub backoff_speed: u8,
    /// Cruising speed of the default forward branch.
    pub cruise_speed: u8,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            threshold_cm: 15.0,
            backoff_speed: 100,
            cruise_speed: 70,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StuckConfig {
    pub backoff_speed: u8,
    pub backoff_seconds: f32,
    pub advance_speed: u8,
    pub advance_seconds: f32,
}

impl Default for StuckConfig {
    fn default() -> Self {
        Self {
            backoff_speed: 80,
            backoff_seconds: 1.0,
            advance_speed: 80,
            advance_seconds: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub backoff_speed: u8,
    pub backoff_seconds: f32,
    /// Pivot away from the waterline after backing off.
    pub turn_speed: u8,
    pub turn_seconds: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            backoff_speed: 90,
            backoff_seconds: 1.0,
            turn_speed: 60,
            turn_seconds: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CansConfig {
    pub approach_speed: u8,
    pub pivot_speed: u8,
    /// Horizontal offset from frame centre, as a fraction of frame width,
    /// inside which the can counts as centred.
    pub center_deadband: f32,
    /// Bounding-box height as a fraction of frame height at which the can is
    /// close enough to grab.
    pub pickup_height_fraction: f32,
    /// Settle time between servo moves of the pick-up choreography.
    pub servo_pause_seconds: f32,
}

impl Default for CansConfig {
    fn default() -> Self {
        Self {
            approach_speed: 60,
            pivot_speed: 50,
            center_deadband: 0.15,
            pickup_height_fraction: 0.55,
            servo_pause_seconds: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Sweep rotation speed while scanning the arena for cans.
    pub spin_speed: u8,
    pub spin_seconds: f32,
    /// Hold still after the sweep so the camera gets a stable frame.
    pub wait_seconds: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            spin_speed: 50,
            spin_seconds: 0.6,
            wait_seconds: 0.8,
        }
    }
}
