use std::time::Duration;

use tracing::debug;

use sandpiper_hal::{MotorDirection, MotorSide, Motors};

/// Whole-robot movement. Turns are in-place pivots: the two wheels spin in
/// opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

/// One timed motor command: hold `movement` at `speed` for `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorInstruction {
    pub movement: Movement,
    /// Percent of full speed, 0–100.
    pub speed: u8,
    pub duration: Duration,
}

impl MotorInstruction {
    pub fn new(movement: Movement, speed: u8, duration_seconds: f32) -> Self {
        Self {
            movement,
            speed,
            duration: Duration::from_secs_f32(duration_seconds),
        }
    }
}

/// Per-wheel directions realizing a movement, or `None` for `Stop`.
fn wheel_directions(movement: Movement) -> Option<(MotorDirection, MotorDirection)> {
    match movement {
        Movement::Forward => Some((MotorDirection::Forward, MotorDirection::Forward)),
        Movement::Backward => Some((MotorDirection::Backward, MotorDirection::Backward)),
        Movement::Left => Some((MotorDirection::Backward, MotorDirection::Forward)),
        Movement::Right => Some((MotorDirection::Forward, MotorDirection::Backward)),
        Movement::Stop => None,
    }
}

/// Issue the motor commands for one movement, without any timing.
pub fn apply_movement(motors: &dyn Motors, movement: Movement, speed: u8) {
    match wheel_directions(movement) {
        Some((left, right)) => {
            motors.drive(MotorSide::Left, speed, left);
            motors.drive(MotorSide::Right, speed, right);
        }
        None => motors.stop(),
    }
}

/// Run a scripted instruction sequence to completion, blocking through each
/// hold. Ends with a stop so the last movement never outlives the script.
///
/// Blocks the calling thread; tick-side callers go through
/// [`crate::executor::InstructionRunner`] instead.
pub fn execute_instructions(motors: &dyn Motors, instructions: &[MotorInstruction]) {
    for instruction in instructions {
        debug!(?instruction, "executing motor instruction");
        apply_movement(motors, instruction.movement, instruction.speed);
        std::thread::sleep(instruction.duration);
    }
    motors.stop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_hal::{MockMotors, MotorCommand};

    #[test]
    fn turns_pivot_in_place() {
        let motors = MockMotors::new();
        apply_movement(&motors, Movement::Left, 50);
        assert_eq!(
            motors.commands(),
            vec![
                MotorCommand::Drive {
                    side: MotorSide::Left,
                    speed: 50,
                    direction: MotorDirection::Backward,
                },
                MotorCommand::Drive {
                    side: MotorSide::Right,
                    speed: 50,
                    direction: MotorDirection::Forward,
                },
            ]
        );
    }

    #[test]
    fn script_ends_with_a_stop() {
        let motors = MockMotors::new();
        execute_instructions(
            &motors,
            &[
                MotorInstruction::new(Movement::Backward, 80, 0.0),
                MotorInstruction::new(Movement::Stop, 0, 0.0),
            ],
        );
        let commands = motors.commands();
        // Backward on both wheels, the scripted stop, the trailing stop.
        assert_eq!(commands.len(), 4);
        assert_eq!(commands.last(), Some(&MotorCommand::Stop));
    }
}
