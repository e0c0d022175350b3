use std::sync::Mutex;

use tracing::info;

use crate::error::HalError;

/// Pure collision decision over the raw sensor readings (centimetres) and a
/// threshold. Kept as a plain function so callers can swap policies without
/// touching the driver.
pub type CollisionStrategy = fn(&[f32], f32) -> bool;

/// Collide when any sensor reads below the threshold.
pub fn any_sensor_strategy(readings_cm: &[f32], threshold_cm: f32) -> bool {
    readings_cm.iter().any(|r| *r < threshold_cm)
}

/// Collide only when every sensor reads below the threshold.
pub fn all_sensors_strategy(readings_cm: &[f32], threshold_cm: f32) -> bool {
    !readings_cm.is_empty() && readings_cm.iter().all(|r| *r < threshold_cm)
}

/// Ultrasonic distance sensor array.
pub trait DistanceSensors: Send + Sync {
    fn setup(&self) -> Result<(), HalError>;

    /// Latest reading per sensor, in centimetres.
    fn readings_cm(&self) -> Vec<f32>;

    fn disable(&self);

    fn is_about_to_collide(&self, threshold_cm: f32, strategy: CollisionStrategy) -> bool {
        strategy(&self.readings_cm(), threshold_cm)
    }
}

/// Host mock that cycles through scripted reading frames.
#[derive(Debug)]
pub struct MockDistanceSensors {
    script: Vec<Vec<f32>>,
    at: Mutex<usize>,
}

impl MockDistanceSensors {
    /// A mock that always reports `reading` on four sensors.
    pub fn constant(reading: f32) -> Self {
        Self::scripted(vec![vec![reading; 4]])
    }

    /// Cycles through `script`, wrapping around at the end.
    pub fn scripted(script: Vec<Vec<f32>>) -> Self {
        assert!(!script.is_empty(), "script must contain at least one frame");
        Self {
            script,
            at: Mutex::new(0),
        }
    }
}

impl DistanceSensors for MockDistanceSensors {
    fn setup(&self) -> Result<(), HalError> {
        info!("mock distance sensors ready");
        Ok(())
    }

    fn readings_cm(&self) -> Vec<f32> {
        let mut at = self.at.lock().unwrap_or_else(|e| e.into_inner());
        let frame = self.script[*at % self.script.len()].clone();
        *at += 1;
        frame
    }

    fn disable(&self) {
        info!("mock distance sensors disabled");
    }
}
