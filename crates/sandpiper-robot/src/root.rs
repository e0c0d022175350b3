//! Root assembly: the data recollection pipeline and the task priority list
//! under one synchronized parallel.

use std::sync::Arc;

use sandpiper_bt::{Node, Parallel, Selector, Sequence};
use sandpiper_hal::{any_sensor_strategy, gyro_stddev_strategy, Hardware};

use crate::config::RobotConfig;
use crate::data::{CaptureFrame, DetectWater, ReadDistanceSensors, ReadImu};
use crate::tasks::{cans, crash, patrol, stuck, water};

/// Sensor pipeline, run in declaration order so every key the task branches
/// read is fresh within the same tick.
pub fn data_subtree(hw: &Hardware, cfg: &RobotConfig) -> Node {
    Node::new(
        "data recollection",
        Sequence::new(vec![
            Node::new(
                "read distance sensors",
                ReadDistanceSensors::new(
                    Arc::clone(&hw.distance),
                    cfg.collision.threshold_cm,
                    any_sensor_strategy,
                ),
            ),
            Node::new(
                "read imu",
                ReadImu::new(Arc::clone(&hw.imu), gyro_stddev_strategy),
            ),
            Node::new("capture frame", CaptureFrame::new(Arc::clone(&hw.camera))),
            Node::new("detect water", DetectWater::new(hw.water)),
        ]),
    )
}

/// Priority list of behaviours, safety first. The trailing cruise branch
/// always succeeds, so the selector only fails if cruising itself is
/// impossible.
pub fn tasks_subtree(hw: &Hardware, cfg: &RobotConfig) -> Node {
    Node::new(
        "tasks",
        Selector::new(vec![
            crash::subtree(hw, &cfg.collision),
            stuck::subtree(hw, &cfg.stuck),
            water::subtree(hw, &cfg.water),
            cans::subtree(hw, &cfg.cans, &cfg.scan),
            Node::new(
                "cruise",
                patrol::Cruise::new(Arc::clone(&hw.motors), cfg.collision.cruise_speed),
            ),
        ]),
    )
}

/// The complete decision tree. Children of the parallel are ticked in order,
/// data recollection first, so task guards always see this tick's readings.
pub fn build_root(hw: &Hardware, cfg: &RobotConfig) -> Node {
    Node::new(
        "sandpiper",
        Parallel::new(vec![data_subtree(hw, cfg), tasks_subtree(hw, cfg)]),
    )
}
