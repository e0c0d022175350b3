use std::sync::Arc;

use tracing::{info, warn};

use crate::buzzer::{Buzzer, MockBuzzer};
use crate::camera::{
    no_water_strategy, Camera, MockCamera, MockDetector, ObjectDetector, WaterStrategy,
};
use crate::display::{Display, MockDisplay};
use crate::distance::{DistanceSensors, MockDistanceSensors};
use crate::error::HalError;
use crate::imu::{Imu, MockImu};
use crate::motors::{MockMotors, Motors};
use crate::servos::{MockServos, Servos};

/// Platform the process is running on. Drives per-device driver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Development host: recording mocks.
    Host,
    /// The robot itself. Concrete GPIO drivers are a platform package not
    /// shipped here, so requesting hardware on this platform fails fast.
    RaspberryPi,
}

impl Platform {
    pub fn detect() -> Self {
        match std::env::consts::ARCH {
            "arm" | "aarch64" => Platform::RaspberryPi,
            _ => Platform::Host,
        }
    }
}

/// Every controller handle the tree needs, constructed once at startup and
/// injected into the nodes that use them. No global singletons: tests build
/// their own bundle around recording mocks.
#[derive(Clone)]
pub struct Hardware {
    pub motors: Arc<dyn Motors>,
    pub distance: Arc<dyn DistanceSensors>,
    pub imu: Arc<dyn Imu>,
    pub camera: Arc<dyn Camera>,
    pub detector: Arc<dyn ObjectDetector>,
    /// Water-boundary verdict over a frame; the host default never triggers.
    pub water: WaterStrategy,
    pub servos: Arc<dyn Servos>,
    pub buzzer: Arc<dyn Buzzer>,
    pub display: Arc<dyn Display>,
}

impl Hardware {
    /// Build the full controller set for `platform`, failing fast when any
    /// device has no driver there.
    pub fn for_platform(platform: Platform) -> Result<Self, HalError> {
        match platform {
            Platform::Host => Ok(Self::mock()),
            Platform::RaspberryPi => {
                warn!("no GPIO driver package linked in");
                Err(HalError::HardwareUnavailable {
                    device: "motors",
                    platform,
                })
            }
        }
    }

    /// A bundle of quiet mocks: still sensors, dark-free camera, nothing
    /// detected.
    pub fn mock() -> Self {
        Self {
            motors: Arc::new(MockMotors::new()),
            distance: Arc::new(MockDistanceSensors::constant(100.0)),
            imu: Arc::new(MockImu::scripted(vec![MockImu::moving_window()])),
            camera: Arc::new(MockCamera::new()),
            detector: Arc::new(MockDetector::empty()),
            water: no_water_strategy,
            servos: Arc::new(MockServos::new()),
            buzzer: Arc::new(MockBuzzer::new()),
            display: Arc::new(MockDisplay::new()),
        }
    }

    /// Run every controller's `setup`, failing on the first error.
    pub fn setup(&self) -> Result<(), HalError> {
        self.motors.setup()?;
        self.distance.setup()?;
        self.imu.setup()?;
        self.camera.setup()?;
        self.servos.setup()?;
        self.buzzer.setup()?;
        self.display.setup()?;
        info!("hardware setup complete");
        Ok(())
    }

    /// Orderly shutdown pass: motors first so the robot stops moving, then
    /// the rest.
    pub fn disable(&self) {
        self.motors.disable();
        self.servos.disable();
        self.buzzer.disable();
        self.camera.disable();
        self.imu.disable();
        self.distance.disable();
        self.display.disable();
        info!("hardware disabled");
    }
}
