//! Can collection: detect, centre on, approach and pick up a can, falling
//! back to an arena scan when nothing is in sight.

use std::sync::Arc;

use sandpiper_bt::{
    AccessDecl, Behaviour, Blackboard, EternalGuard, Node, Selector, Sequence, Status, TickContext,
};
use sandpiper_hal::{
    Detection, Display, Hardware, Melody, Motors, ObjectDetector, ServoPair, ServoState, Servos,
};

use crate::config::{CansConfig, ScanConfig};
use crate::instructions::{apply_movement, Movement};
use crate::keys;
use crate::tasks::{patrol, PlayMelody};

const CAN_CATEGORY: &str = "can";

/// Runs the detector over the current frame and publishes the best can.
///
/// A frame with no can keeps the previous detection alive so a half-grabbed
/// can slipping out of view does not abort the choreography; the detection
/// is reset by [`MarkCollected`] once the can lands in the tray.
struct SearchForCan {
    detector: Arc<dyn ObjectDetector>,
}

impl SearchForCan {
    fn best_can(&self, detections: Vec<Detection>) -> Option<Detection> {
        detections
            .into_iter()
            .filter(|d| d.category == CAN_CATEGORY)
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

impl Behaviour for SearchForCan {
    fn update(&mut self, _ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let Some(frame) = bb.get(keys::FRAME).copied() else {
            return Status::Failure;
        };

        match self.best_can(self.detector.detect(&frame)) {
            Some(best) => bb.set(keys::DETECTION, Some(best)),
            None if !bb.contains(keys::DETECTION) => bb.set(keys::DETECTION, None),
            None => {}
        }
        Status::Success
    }

    fn access(&self) -> AccessDecl {
        AccessDecl::new().read(keys::FRAME).write(keys::DETECTION)
    }
}

/// Steers toward the detected can: pivots until the bounding box is centred,
/// then rolls forward until the box is tall enough to grab.
struct ApproachCan {
    motors: Arc<dyn Motors>,
    approach_speed: u8,
    pivot_speed: u8,
    center_deadband: f32,
    pickup_height_fraction: f32,
}

impl Behaviour for ApproachCan {
    fn update(&mut self, _ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let Some(frame) = bb.get(keys::FRAME).copied() else {
            return Status::Failure;
        };
        // A zero-sized frame has no usable geometry.
        if frame.width == 0 || frame.height == 0 {
            return Status::Failure;
        }
        let Some(Some(detection)) = bb.get(keys::DETECTION) else {
            return Status::Failure;
        };
        let bbox = detection.bounding_box;

        let height_fraction = bbox.height as f32 / frame.height as f32;
        if height_fraction >= self.pickup_height_fraction {
            return Status::Success;
        }

        let offset = bbox.center_x() - frame.width as i32 / 2;
        let deadband = self.center_deadband * frame.width as f32;
        let movement = if (offset.abs() as f32) > deadband {
            if offset < 0 {
                Movement::Left
            } else {
                Movement::Right
            }
        } else {
            Movement::Forward
        };
        let speed = match movement {
            Movement::Forward => self.approach_speed,
            _ => self.pivot_speed,
        };
        apply_movement(self.motors.as_ref(), movement, speed);
        Status::Running
    }

    fn terminate(&mut self, _ctx: &TickContext, _bb: &mut Blackboard, _status: Status) {
        self.motors.stop();
    }

    fn access(&self) -> AccessDecl {
        AccessDecl::new().read(keys::FRAME).read(keys::DETECTION)
    }
}

/// Commands one servo position and succeeds.
struct SetServo {
    servos: Arc<dyn Servos>,
    pair: ServoPair,
    state: ServoState,
}

impl Behaviour for SetServo {
    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        self.servos.move_to(self.pair, self.state);
        Status::Success
    }
}

/// Bookkeeping tail of a successful pick-up: bump the tray count, clear the
/// detection so the search starts fresh, and show the tally.
struct MarkCollected {
    display: Arc<dyn Display>,
}

impl Behaviour for MarkCollected {
    fn update(&mut self, _ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let count = bb.get(keys::CANS_IN_TRAY).copied().unwrap_or(0) + 1;
        bb.set(keys::CANS_IN_TRAY, count);
        bb.set(keys::DETECTION, None);
        self.display.show(&format!("cans: {count}"));
        Status::Success
    }

    fn access(&self) -> AccessDecl {
        AccessDecl::new()
            .write(keys::CANS_IN_TRAY)
            .write(keys::DETECTION)
    }
}

fn servo_step(hw: &Hardware, name: &'static str, pair: ServoPair, state: ServoState) -> Node {
    Node::new(
        name,
        SetServo {
            servos: Arc::clone(&hw.servos),
            pair,
            state,
        },
    )
}

fn settle(hw: &Hardware, seconds: f32) -> Node {
    Node::new(
        "settle",
        patrol::StopAndWait::new(Arc::clone(&hw.motors), seconds),
    )
}

/// The full collection branch: search, then either the guarded
/// approach-and-pick-up sequence or the arena scan fallback.
pub fn subtree(hw: &Hardware, cfg: &CansConfig, scan: &ScanConfig) -> Node {
    let pause = cfg.servo_pause_seconds;
    let collect = Sequence::with_memory(vec![
        Node::new(
            "approach can",
            ApproachCan {
                motors: Arc::clone(&hw.motors),
                approach_speed: cfg.approach_speed,
                pivot_speed: cfg.pivot_speed,
                center_deadband: cfg.center_deadband,
                pickup_height_fraction: cfg.pickup_height_fraction,
            },
        ),
        servo_step(hw, "lower arm", ServoPair::Arm, ServoState::Expanded),
        settle(hw, pause),
        servo_step(hw, "grip can", ServoPair::Claw, ServoState::Expanded),
        settle(hw, pause),
        servo_step(hw, "lift arm", ServoPair::Arm, ServoState::Retracted),
        settle(hw, pause),
        servo_step(hw, "release into tray", ServoPair::Claw, ServoState::Retracted),
        Node::new(
            "celebrate",
            PlayMelody::new(Arc::clone(&hw.buzzer), Melody::CanFound),
        ),
        Node::new(
            "log collection",
            MarkCollected {
                display: Arc::clone(&hw.display),
            },
        ),
    ]);

    let guarded = Node::new(
        "can in sight?",
        EternalGuard::new(Node::new("collect can", collect), |view| {
            matches!(view.get(keys::DETECTION), Some(Some(_)))
        })
        .reading(keys::DETECTION),
    );

    Node::new(
        "clean the beach",
        Sequence::new(vec![
            Node::new(
                "search for can",
                SearchForCan {
                    detector: Arc::clone(&hw.detector),
                },
            ),
            Node::new(
                "collect or scan",
                Selector::new(vec![guarded, patrol::scan_subtree(hw, scan)]),
            ),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_bt::Blackboard;
    use sandpiper_hal::{Frame, MockDetector, MockMotors};

    #[test]
    fn approach_rejects_zero_sized_frames() {
        let mut approach = ApproachCan {
            motors: Arc::new(MockMotors::new()),
            approach_speed: 60,
            pivot_speed: 50,
            center_deadband: 0.15,
            pickup_height_fraction: 0.55,
        };
        let mut bb = Blackboard::new();
        bb.set(keys::FRAME, Frame::new(0, 0));
        bb.set(keys::DETECTION, Some(MockDetector::can_at(0, 10, 10)));

        let status = approach.update(&TickContext::new(0, 0.1), &mut bb);
        assert_eq!(status, Status::Failure);
    }
}
