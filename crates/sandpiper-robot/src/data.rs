//! Data recollection leaves: each tick they read one sensor and publish the
//! result on the blackboard before the task branches evaluate. All of them
//! return `Success` so the recollection sequence keeps flowing; a sensor
//! hiccup shows up as a stale or missing key, not a failed tick.

use std::sync::Arc;

use tracing::{trace, warn};

use sandpiper_bt::{AccessDecl, Behaviour, Blackboard, Status, TickContext};
use sandpiper_hal::{Camera, CollisionStrategy, DistanceSensors, Imu, StuckStrategy, WaterStrategy};

use crate::keys;

/// Publishes the closest reading as [`keys::DISTANCE_CM`] and the strategy
/// verdict over the full array as [`keys::ABOUT_TO_COLLIDE`].
pub struct ReadDistanceSensors {
    sensors: Arc<dyn DistanceSensors>,
    threshold_cm: f32,
    strategy: CollisionStrategy,
}

impl ReadDistanceSensors {
    pub fn new(
        sensors: Arc<dyn DistanceSensors>,
        threshold_cm: f32,
        strategy: CollisionStrategy,
    ) -> Self {
        Self {
            sensors,
            threshold_cm,
            strategy,
        }
    }
}

impl Behaviour for ReadDistanceSensors {
    fn update(&mut self, _ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let readings = self.sensors.readings_cm();
        let closest = readings.iter().copied().fold(f32::INFINITY, f32::min);
        let colliding = (self.strategy)(&readings, self.threshold_cm);
        trace!(closest, colliding, "distance sensors");

        bb.set(keys::DISTANCE_CM, closest);
        bb.set(keys::ABOUT_TO_COLLIDE, colliding);
        Status::Success
    }

    fn access(&self) -> AccessDecl {
        AccessDecl::new()
            .write(keys::DISTANCE_CM)
            .write(keys::ABOUT_TO_COLLIDE)
    }
}

/// Publishes the stuck verdict for the latest inertial window as
/// [`keys::IS_STUCK`].
pub struct ReadImu {
    imu: Arc<dyn Imu>,
    strategy: StuckStrategy,
}

impl ReadImu {
    pub fn new(imu: Arc<dyn Imu>, strategy: StuckStrategy) -> Self {
        Self { imu, strategy }
    }
}

impl Behaviour for ReadImu {
    fn update(&mut self, _ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let stuck = self.imu.is_robot_stuck(self.strategy);
        trace!(stuck, "imu");
        bb.set(keys::IS_STUCK, stuck);
        Status::Success
    }

    fn access(&self) -> AccessDecl {
        AccessDecl::new().write(keys::IS_STUCK)
    }
}

/// Publishes the latest camera frame as [`keys::FRAME`].
///
/// On a dropped frame the key is left untouched so frame consumers keep
/// working from the previous capture, and the node still succeeds.
pub struct CaptureFrame {
    camera: Arc<dyn Camera>,
}

impl CaptureFrame {
    pub fn new(camera: Arc<dyn Camera>) -> Self {
        Self { camera }
    }
}

impl Behaviour for CaptureFrame {
    fn update(&mut self, _ctx: &TickContext, bb: &mut Blackboard) -> Status {
        match self.camera.current_frame() {
            Some(frame) => bb.set(keys::FRAME, frame),
            None => warn!("camera dropped a frame"),
        }
        Status::Success
    }

    fn access(&self) -> AccessDecl {
        AccessDecl::new().write(keys::FRAME)
    }
}

/// Publishes the water-boundary verdict for the current frame as
/// [`keys::NEAR_WATER`]. Without a frame the verdict is `false`.
pub struct DetectWater {
    strategy: WaterStrategy,
}

impl DetectWater {
    pub fn new(strategy: WaterStrategy) -> Self {
        Self { strategy }
    }
}

impl Behaviour for DetectWater {
    fn update(&mut self, _ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let near_water = bb.get(keys::FRAME).map(self.strategy).unwrap_or(false);
        bb.set(keys::NEAR_WATER, near_water);
        Status::Success
    }

    fn access(&self) -> AccessDecl {
        AccessDecl::new()
            .read(keys::FRAME)
            .write(keys::NEAR_WATER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_bt::Node;
    use sandpiper_hal::{any_sensor_strategy, gyro_stddev_strategy};
    use sandpiper_hal::{Frame, MockCamera, MockDistanceSensors, MockImu};

    fn tick(node: &mut Node, bb: &mut Blackboard) -> Status {
        node.tick(&TickContext::new(0, 0.1), bb)
    }

    #[test]
    fn distance_node_publishes_minimum_and_verdict() {
        let sensors = Arc::new(MockDistanceSensors::scripted(vec![vec![
            40.0, 12.0, 55.0, 60.0,
        ]]));
        let mut node = Node::new(
            "read distance",
            ReadDistanceSensors::new(sensors, 15.0, any_sensor_strategy),
        );
        let mut bb = Blackboard::new();

        assert_eq!(tick(&mut node, &mut bb), Status::Success);
        assert_eq!(bb.get(keys::DISTANCE_CM), Some(&12.0));
        assert_eq!(bb.get(keys::ABOUT_TO_COLLIDE), Some(&true));
    }

    #[test]
    fn imu_node_publishes_stuck_flag() {
        let imu = Arc::new(MockImu::scripted(vec![
            MockImu::moving_window(),
            MockImu::stuck_window(),
        ]));
        let mut node = Node::new("read imu", ReadImu::new(imu, gyro_stddev_strategy));
        let mut bb = Blackboard::new();

        tick(&mut node, &mut bb);
        assert_eq!(bb.get(keys::IS_STUCK), Some(&false));
        tick(&mut node, &mut bb);
        assert_eq!(bb.get(keys::IS_STUCK), Some(&true));
    }

    #[test]
    fn dropped_frame_keeps_previous_capture() {
        let mut bb = Blackboard::new();
        bb.set(keys::FRAME, Frame::new(320, 240));

        let mut node = Node::new("capture", CaptureFrame::new(Arc::new(MockCamera::dark())));
        assert_eq!(tick(&mut node, &mut bb), Status::Success);
        assert_eq!(bb.get(keys::FRAME), Some(&Frame::new(320, 240)));
    }

    #[test]
    fn water_verdict_is_false_without_a_frame() {
        fn always(_: &Frame) -> bool {
            true
        }
        let mut node = Node::new("detect water", DetectWater::new(always));
        let mut bb = Blackboard::new();

        tick(&mut node, &mut bb);
        assert_eq!(bb.get(keys::NEAR_WATER), Some(&false));

        bb.set(keys::FRAME, Frame::new(640, 480));
        tick(&mut node, &mut bb);
        assert_eq!(bb.get(keys::NEAR_WATER), Some(&true));
    }
}
