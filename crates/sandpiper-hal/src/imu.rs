use std::sync::Mutex;

use tracing::info;

use crate::error::HalError;

/// A short window of recent inertial samples, one `[x, y, z]` triple per
/// sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImuWindow {
    pub gyro: Vec<[f32; 3]>,
    pub accel: Vec<[f32; 3]>,
}

/// Pure stuck decision over a sample window.
pub type StuckStrategy = fn(&ImuWindow) -> bool;

fn stddev(samples: &[[f32; 3]], axis: usize) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }
    let n = samples.len() as f32;
    let mean = samples.iter().map(|s| s[axis]).sum::<f32>() / n;
    let var = samples.iter().map(|s| (s[axis] - mean).powi(2)).sum::<f32>() / n;
    var.sqrt()
}

const GYRO_QUIET_STDDEV: f32 = 0.02;
const ACCEL_QUIET_STDDEV: f32 = 0.05;

/// Stuck when every gyroscope axis is quiet: the wheels may spin but the
/// chassis is not rotating at all.
pub fn gyro_stddev_strategy(window: &ImuWindow) -> bool {
    !window.gyro.is_empty() && (0..3).all(|axis| stddev(&window.gyro, axis) < GYRO_QUIET_STDDEV)
}

/// Stuck when every accelerometer axis is quiet.
pub fn accel_stddev_strategy(window: &ImuWindow) -> bool {
    !window.accel.is_empty() && (0..3).all(|axis| stddev(&window.accel, axis) < ACCEL_QUIET_STDDEV)
}

/// Inertial measurement unit.
pub trait Imu: Send + Sync {
    fn setup(&self) -> Result<(), HalError>;

    fn sample_window(&self) -> ImuWindow;

    fn disable(&self);

    fn is_robot_stuck(&self, strategy: StuckStrategy) -> bool {
        strategy(&self.sample_window())
    }
}

/// Host mock returning a scripted sequence of windows.
#[derive(Debug)]
pub struct MockImu {
    script: Vec<ImuWindow>,
    at: Mutex<usize>,
}

impl MockImu {
    pub fn scripted(script: Vec<ImuWindow>) -> Self {
        assert!(!script.is_empty(), "script must contain at least one window");
        Self {
            script,
            at: Mutex::new(0),
        }
    }

    /// A window that reads as "moving" to both strategies.
    pub fn moving_window() -> ImuWindow {
        ImuWindow {
            gyro: vec![[0.0, 0.1, 0.0], [0.3, -0.2, 0.1], [-0.1, 0.4, -0.3]],
            accel: vec![[0.1, 0.0, 9.8], [0.5, -0.3, 9.6], [-0.2, 0.4, 10.0]],
        }
    }

    /// A window that reads as "stuck" to both strategies.
    pub fn stuck_window() -> ImuWindow {
        ImuWindow {
            gyro: vec![[0.0; 3]; 3],
            accel: vec![[0.0, 0.0, 9.8]; 3],
        }
    }
}

impl Imu for MockImu {
    fn setup(&self) -> Result<(), HalError> {
        info!("mock IMU ready");
        Ok(())
    }

    fn sample_window(&self) -> ImuWindow {
        let mut at = self.at.lock().unwrap_or_else(|e| e.into_inner());
        let window = self.script[*at % self.script.len()].clone();
        *at += 1;
        window
    }

    fn disable(&self) {
        info!("mock IMU disabled");
    }
}
