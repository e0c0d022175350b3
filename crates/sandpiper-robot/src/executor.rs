use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, error, warn};

use sandpiper_bt::{Behaviour, Blackboard, Status, TickContext};
use sandpiper_hal::Motors;

use crate::instructions::{execute_instructions, MotorInstruction};

/// Runs a fixed instruction script on a background worker thread so the tick
/// loop never blocks through the timed holds.
///
/// At most one worker exists per runner. A started script runs to
/// completion: there is no cancellation channel, so a pre-empted runner keeps
/// its worker alive and a later tick resumes polling the same run instead of
/// spawning a second one.
pub struct InstructionRunner {
    motors: Arc<dyn Motors>,
    instructions: Arc<[MotorInstruction]>,
    worker: Option<JoinHandle<()>>,
}

impl InstructionRunner {
    pub fn new(motors: Arc<dyn Motors>, instructions: Vec<MotorInstruction>) -> Self {
        Self {
            motors,
            instructions: instructions.into(),
            worker: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    /// Drive the runner one step: start the worker if idle, otherwise report
    /// on the in-flight run.
    ///
    /// `Success` is returned exactly once per run, on the poll that observes
    /// the worker finished; the next poll starts a fresh run.
    pub fn poll(&mut self) -> Status {
        match self.worker.take() {
            None => self.spawn(),
            Some(handle) if !handle.is_finished() => {
                self.worker = Some(handle);
                Status::Running
            }
            Some(handle) => match handle.join() {
                Ok(()) => {
                    debug!("instruction run complete");
                    Status::Success
                }
                Err(_) => {
                    error!("instruction worker panicked");
                    Status::Failure
                }
            },
        }
    }

    fn spawn(&mut self) -> Status {
        let motors = Arc::clone(&self.motors);
        let instructions = Arc::clone(&self.instructions);
        let spawned = std::thread::Builder::new()
            .name("instruction-runner".to_string())
            .spawn(move || execute_instructions(motors.as_ref(), &instructions));

        match spawned {
            Ok(handle) => {
                debug!(count = self.instructions.len(), "instruction run started");
                self.worker = Some(handle);
                Status::Running
            }
            Err(err) => {
                error!(%err, "failed to spawn instruction worker");
                Status::Failure
            }
        }
    }
}

/// Leaf wrapping an [`InstructionRunner`]: `Running` while the script plays,
/// `Success` once it finished.
pub struct ExecuteInstructions {
    runner: InstructionRunner,
}

impl ExecuteInstructions {
    pub fn new(motors: Arc<dyn Motors>, instructions: Vec<MotorInstruction>) -> Self {
        Self {
            runner: InstructionRunner::new(motors, instructions),
        }
    }
}

impl Behaviour for ExecuteInstructions {
    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        self.runner.poll()
    }

    fn terminate(&mut self, _ctx: &TickContext, _bb: &mut Blackboard, status: Status) {
        // Pre-emption cannot interrupt the worker mid-hold; the script plays
        // out and the runner is picked up again on re-entry.
        if status == Status::Failure && self.runner.is_active() {
            warn!("instruction run pre-empted; script plays to completion");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Movement;
    use sandpiper_hal::{HalError, MockMotors, MotorDirection, MotorSide};

    struct PanickingMotors;

    impl Motors for PanickingMotors {
        fn setup(&self) -> Result<(), HalError> {
            Ok(())
        }

        fn drive(&self, _side: MotorSide, _speed: u8, _direction: MotorDirection) {
            panic!("driver fault");
        }

        fn stop(&self) {}

        fn disable(&self) {}
    }

    fn poll_until_terminal(runner: &mut InstructionRunner) -> Status {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
        loop {
            match runner.poll() {
                Status::Running => {
                    assert!(
                        std::time::Instant::now() < deadline,
                        "worker never finished"
                    );
                    std::thread::sleep(std::time::Duration::from_millis(2));
                }
                terminal => return terminal,
            }
        }
    }

    #[test]
    fn worker_panic_surfaces_as_failure() {
        let mut runner = InstructionRunner::new(
            Arc::new(PanickingMotors),
            vec![MotorInstruction::new(Movement::Forward, 40, 0.0)],
        );

        assert_eq!(runner.poll(), Status::Running);
        assert_eq!(poll_until_terminal(&mut runner), Status::Failure);
        // The handle is consumed by the failing join.
        assert!(!runner.is_active());
    }

    #[test]
    fn zero_length_script_reports_one_success() {
        let mut runner = InstructionRunner::new(Arc::new(MockMotors::new()), Vec::new());
        assert_eq!(runner.poll(), Status::Running);
        while runner.is_active() {
            if runner.poll() == Status::Success {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        panic!("runner never reported success");
    }

    #[test]
    fn completed_run_restarts_on_next_poll() {
        let motors = Arc::new(MockMotors::new());
        let mut runner = InstructionRunner::new(
            motors.clone(),
            vec![MotorInstruction::new(Movement::Forward, 40, 0.0)],
        );

        assert_eq!(runner.poll(), Status::Running);
        loop {
            std::thread::sleep(std::time::Duration::from_millis(2));
            match runner.poll() {
                Status::Running => continue,
                status => {
                    assert_eq!(status, Status::Success);
                    break;
                }
            }
        }
        assert!(!runner.is_active());

        // Next poll begins a fresh run.
        assert_eq!(runner.poll(), Status::Running);
    }
}
