//! Hardware capability interfaces for the sandpiper robot.
//!
//! The control core only ever talks to the narrow traits defined here.
//! Concrete GPIO/I2C/PWM drivers are platform packages outside this
//! repository; on host platforms the factories hand out recording mocks so
//! the whole tree can run (and be tested) without a robot attached.

#![forbid(unsafe_code)]

pub mod buzzer;
pub mod camera;
pub mod display;
pub mod distance;
pub mod error;
pub mod imu;
pub mod motors;
pub mod platform;
pub mod servos;

pub use buzzer::{Buzzer, Melody, MockBuzzer};
pub use camera::{
    no_water_strategy, BoundingBox, Camera, Detection, Frame, MockCamera, MockDetector,
    ObjectDetector, WaterStrategy,
};
pub use display::{Display, MockDisplay};
pub use distance::{
    all_sensors_strategy, any_sensor_strategy, CollisionStrategy, DistanceSensors,
    MockDistanceSensors,
};
pub use error::HalError;
pub use imu::{accel_stddev_strategy, gyro_stddev_strategy, Imu, ImuWindow, MockImu, StuckStrategy};
pub use motors::{MockMotors, MotorCommand, MotorDirection, MotorSide, Motors};
pub use platform::{Hardware, Platform};
pub use servos::{MockServos, ServoPair, ServoState, Servos};
