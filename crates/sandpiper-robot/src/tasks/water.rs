//! Shoreline avoidance: back off the waterline and pivot toward dry sand.

use std::sync::Arc;

use sandpiper_bt::{EternalGuard, Node};
use sandpiper_hal::Hardware;

use crate::config::WaterConfig;
use crate::executor::ExecuteInstructions;
use crate::instructions::{MotorInstruction, Movement};
use crate::keys;

pub fn subtree(hw: &Hardware, cfg: &WaterConfig) -> Node {
    let script = vec![
        MotorInstruction::new(Movement::Backward, cfg.backoff_speed, cfg.backoff_seconds),
        MotorInstruction::new(Movement::Left, cfg.turn_speed, cfg.turn_seconds),
    ];

    let retreat = Node::new(
        "retreat from water",
        ExecuteInstructions::new(Arc::clone(&hw.motors), script),
    );

    Node::new(
        "near water?",
        EternalGuard::new(retreat, |view| {
            view.get(keys::NEAR_WATER).copied().unwrap_or(false)
        })
        .reading(keys::NEAR_WATER),
    )
}
