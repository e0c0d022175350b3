use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use sandpiper_bt::{Blackboard, Node, Status, TickContext};

/// Fixed-cadence tick loop around a tree root and its blackboard.
pub struct TickDriver {
    root: Node,
    blackboard: Blackboard,
    period: Duration,
    tick: u64,
}

impl TickDriver {
    pub fn new(root: Node, tick_hz: u32) -> Self {
        let hz = tick_hz.max(1);
        Self {
            root,
            blackboard: Blackboard::new(),
            period: Duration::from_secs_f64(1.0 / f64::from(hz)),
            tick: 0,
        }
    }

    pub fn blackboard(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Evaluate the tree once.
    pub fn step(&mut self) -> Status {
        let ctx = TickContext::new(self.tick, self.period.as_secs_f32());
        let status = self.root.tick(&ctx, &mut self.blackboard);
        debug!(tick = self.tick, ?status, "tick");
        self.tick += 1;
        status
    }

    /// Tick at the configured cadence until `shutdown` is raised or
    /// `max_ticks` have run. Sleeps the remainder of each period; an
    /// overrunning tick just starts the next one immediately.
    pub fn run(&mut self, shutdown: &AtomicBool, max_ticks: Option<u64>) {
        info!(period_ms = self.period.as_millis() as u64, "tick loop started");
        while !shutdown.load(Ordering::Relaxed) {
            let started = Instant::now();
            self.step();

            if max_ticks.is_some_and(|max| self.tick >= max) {
                break;
            }
            std::thread::sleep(self.period.saturating_sub(started.elapsed()));
        }

        // Teardown: pre-empt still-running branches so their terminate hooks
        // release in-flight side effects before the hardware disable pass.
        let ctx = TickContext::new(self.tick, self.period.as_secs_f32());
        self.root.stop(&ctx, &mut self.blackboard, Status::Failure);
        info!(ticks = self.tick, "tick loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_bt::{Behaviour, TickContext};

    struct CountTicks(u64);

    impl Behaviour for CountTicks {
        fn update(&mut self, ctx: &TickContext, _bb: &mut Blackboard) -> Status {
            self.0 = ctx.tick;
            Status::Success
        }
    }

    #[test]
    fn run_honours_max_ticks() {
        let mut driver = TickDriver::new(Node::new("count", CountTicks(0)), 1000);
        let shutdown = AtomicBool::new(false);
        driver.run(&shutdown, Some(3));
        assert_eq!(driver.ticks(), 3);
    }

    #[test]
    fn run_honours_shutdown_flag() {
        let mut driver = TickDriver::new(Node::new("count", CountTicks(0)), 1000);
        let shutdown = AtomicBool::new(true);
        driver.run(&shutdown, None);
        assert_eq!(driver.ticks(), 0);
    }
}
