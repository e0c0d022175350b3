//! Movement primitives with in-node timing, plus the arena scan and the
//! default cruise branch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sandpiper_bt::{Behaviour, Blackboard, Node, Sequence, Status, TickContext};
use sandpiper_hal::{Hardware, Motors};

use crate::config::ScanConfig;
use crate::instructions::{apply_movement, Movement};

/// Holds one movement for a wall-clock duration, measured from the first
/// `update` after (re-)initialisation. Does not stop the wheels on success;
/// the next primitive in the sequence issues its own commands.
pub struct TimedMove {
    motors: Arc<dyn Motors>,
    movement: Movement,
    speed: u8,
    duration: Duration,
    started: Option<Instant>,
}

impl TimedMove {
    pub fn new(motors: Arc<dyn Motors>, movement: Movement, speed: u8, seconds: f32) -> Self {
        Self {
            motors,
            movement,
            speed,
            duration: Duration::from_secs_f32(seconds),
            started: None,
        }
    }
}

impl Behaviour for TimedMove {
    fn initialise(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) {
        self.started = None;
    }

    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        let started = *self.started.get_or_insert_with(|| {
            apply_movement(self.motors.as_ref(), self.movement, self.speed);
            Instant::now()
        });

        if started.elapsed() >= self.duration {
            Status::Success
        } else {
            Status::Running
        }
    }
}

/// Stops the wheels and holds still for a wall-clock duration.
pub struct StopAndWait {
    motors: Arc<dyn Motors>,
    duration: Duration,
    started: Option<Instant>,
}

impl StopAndWait {
    pub fn new(motors: Arc<dyn Motors>, seconds: f32) -> Self {
        Self {
            motors,
            duration: Duration::from_secs_f32(seconds),
            started: None,
        }
    }
}

impl Behaviour for StopAndWait {
    fn initialise(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) {
        self.started = None;
    }

    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        let started = *self.started.get_or_insert_with(|| {
            self.motors.stop();
            Instant::now()
        });

        if started.elapsed() >= self.duration {
            Status::Success
        } else {
            Status::Running
        }
    }
}

/// Default branch: keep rolling forward. Always succeeds, so the priority
/// selector above never fails outright.
pub struct Cruise {
    motors: Arc<dyn Motors>,
    speed: u8,
}

impl Cruise {
    pub fn new(motors: Arc<dyn Motors>, speed: u8) -> Self {
        Self { motors, speed }
    }
}

impl Behaviour for Cruise {
    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        apply_movement(self.motors.as_ref(), Movement::Forward, self.speed);
        Status::Success
    }
}

/// Sweep in place, then hold still so the next capture is sharp. Runs when
/// no can is in sight.
pub fn scan_subtree(hw: &Hardware, cfg: &ScanConfig) -> Node {
    Node::new(
        "scan arena",
        Sequence::with_memory(vec![
            Node::new(
                "sweep",
                TimedMove::new(
                    Arc::clone(&hw.motors),
                    Movement::Left,
                    cfg.spin_speed,
                    cfg.spin_seconds,
                ),
            ),
            Node::new(
                "hold still",
                StopAndWait::new(Arc::clone(&hw.motors), cfg.wait_seconds),
            ),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_hal::{MockMotors, MotorCommand};

    fn ctx(tick: u64) -> TickContext {
        TickContext::new(tick, 0.1)
    }

    #[test]
    fn timed_move_issues_commands_once_then_times_out() {
        let motors = Arc::new(MockMotors::new());
        let mut node = Node::new(
            "sweep",
            TimedMove::new(Arc::clone(&motors) as Arc<dyn Motors>, Movement::Left, 50, 0.01),
        );
        let mut bb = Blackboard::new();

        assert_eq!(node.tick(&ctx(0), &mut bb), Status::Running);
        assert_eq!(node.tick(&ctx(1), &mut bb), Status::Running);
        // Commands are issued on the first update only.
        assert_eq!(motors.commands().len(), 2);

        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(node.tick(&ctx(2), &mut bb), Status::Success);
    }

    #[test]
    fn stop_and_wait_stops_first() {
        let motors = Arc::new(MockMotors::new());
        let mut node = Node::new(
            "hold",
            StopAndWait::new(Arc::clone(&motors) as Arc<dyn Motors>, 0.0),
        );
        let mut bb = Blackboard::new();

        assert_eq!(node.tick(&ctx(0), &mut bb), Status::Success);
        assert_eq!(motors.commands(), vec![MotorCommand::Stop]);
    }
}
