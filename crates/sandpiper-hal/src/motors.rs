use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::HalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorDirection {
    Forward,
    Backward,
}

/// Drive motor pair.
///
/// Command methods take `&self`: the handle is shared between the tick
/// thread and background instruction workers, so implementations serialize
/// their internal hardware state behind a mutex.
pub trait Motors: Send + Sync {
    fn setup(&self) -> Result<(), HalError>;

    /// Drive one side at `speed` percent (0–100) in `direction`.
    fn drive(&self, side: MotorSide, speed: u8, direction: MotorDirection);

    fn stop(&self);

    /// Stop and release the underlying hardware.
    fn disable(&self);
}

/// A single issued motor command, recorded by [`MockMotors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCommand {
    Drive {
        side: MotorSide,
        speed: u8,
        direction: MotorDirection,
    },
    Stop,
}

/// Host-platform mock: logs and records every command in issue order.
#[derive(Debug, Default)]
pub struct MockMotors {
    commands: Mutex<Vec<MotorCommand>>,
}

impl MockMotors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<MotorCommand> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<MotorCommand>> {
        // Keep recording even if a worker thread panicked mid-command.
        self.commands.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Motors for MockMotors {
    fn setup(&self) -> Result<(), HalError> {
        info!("mock motors ready");
        Ok(())
    }

    fn drive(&self, side: MotorSide, speed: u8, direction: MotorDirection) {
        debug!(?side, speed, ?direction, "drive");
        self.lock().push(MotorCommand::Drive {
            side,
            speed: speed.min(100),
            direction,
        });
    }

    fn stop(&self) {
        debug!("stop motors");
        self.lock().push(MotorCommand::Stop);
    }

    fn disable(&self) {
        self.stop();
        info!("mock motors disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_commands_in_order() {
        let motors = MockMotors::new();
        motors.drive(MotorSide::Left, 80, MotorDirection::Forward);
        motors.drive(MotorSide::Right, 120, MotorDirection::Backward);
        motors.stop();

        assert_eq!(
            motors.commands(),
            vec![
                MotorCommand::Drive {
                    side: MotorSide::Left,
                    speed: 80,
                    direction: MotorDirection::Forward,
                },
                // Speed is clamped to the 0-100 contract.
                MotorCommand::Drive {
                    side: MotorSide::Right,
                    speed: 100,
                    direction: MotorDirection::Backward,
                },
                MotorCommand::Stop,
            ]
        );
    }
}
