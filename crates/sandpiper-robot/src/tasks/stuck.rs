//! Recovery branch for a robot that stopped making progress: a timed
//! back-and-forth wiggle played through the background instruction runner.

use std::sync::Arc;

use sandpiper_bt::{EternalGuard, Node, Sequence};
use sandpiper_hal::{Hardware, Melody};

use crate::config::StuckConfig;
use crate::executor::ExecuteInstructions;
use crate::instructions::{MotorInstruction, Movement};
use crate::keys;
use crate::tasks::PlayMelody;

pub fn subtree(hw: &Hardware, cfg: &StuckConfig) -> Node {
    let script = vec![
        MotorInstruction::new(Movement::Backward, cfg.backoff_speed, cfg.backoff_seconds),
        MotorInstruction::new(Movement::Forward, cfg.advance_speed, cfg.advance_seconds),
    ];

    let recover = Sequence::with_memory(vec![
        Node::new(
            "announce stuck",
            PlayMelody::new(Arc::clone(&hw.buzzer), Melody::RobotStuck),
        ),
        Node::new(
            "wiggle free",
            ExecuteInstructions::new(Arc::clone(&hw.motors), script),
        ),
    ]);

    Node::new(
        "robot stuck?",
        EternalGuard::new(Node::new("recover", recover), |view| {
            view.get(keys::IS_STUCK).copied().unwrap_or(false)
        })
        .reading(keys::IS_STUCK),
    )
}
