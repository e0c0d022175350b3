//! Highest-priority branch: back away from an obstacle dead ahead.

use std::sync::Arc;

use sandpiper_bt::{Behaviour, Blackboard, EternalGuard, Node, Status, TickContext};
use sandpiper_hal::{Buzzer, Hardware, Melody, Motors};

use crate::config::CollisionConfig;
use crate::instructions::{apply_movement, Movement};
use crate::keys;

/// Reverses at full configured speed for as long as it is ticked, announcing
/// itself once on entry. Never finishes on its own: the guard above releases
/// it when the obstacle clears, and `terminate` stops the wheels.
struct BackAway {
    motors: Arc<dyn Motors>,
    buzzer: Arc<dyn Buzzer>,
    speed: u8,
}

impl Behaviour for BackAway {
    fn initialise(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) {
        self.buzzer.play(Melody::AboutToCollide);
    }

    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        apply_movement(self.motors.as_ref(), Movement::Backward, self.speed);
        Status::Running
    }

    fn terminate(&mut self, _ctx: &TickContext, _bb: &mut Blackboard, _status: Status) {
        self.motors.stop();
    }
}

/// `EternalGuard` branch that takes over while the closest obstacle sits
/// inside the collision threshold.
pub fn subtree(hw: &Hardware, cfg: &CollisionConfig) -> Node {
    let back_away = Node::new(
        "back away",
        BackAway {
            motors: Arc::clone(&hw.motors),
            buzzer: Arc::clone(&hw.buzzer),
            speed: cfg.backoff_speed,
        },
    );

    let threshold_cm = cfg.threshold_cm;
    Node::new(
        "about to crash?",
        EternalGuard::new(back_away, move |view| {
            view.get(keys::DISTANCE_CM)
                .is_some_and(|distance| *distance < threshold_cm)
        })
        .reading(keys::DISTANCE_CM),
    )
}
