//! Background instruction execution through the tree node surface: the tick
//! thread keeps returning `Running` while the worker plays the script, sees
//! exactly one `Success`, and a later tick starts a fresh run.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sandpiper_bt::{Blackboard, Node, Status, TickContext};
use sandpiper_hal::{MockMotors, MotorCommand, MotorDirection, Motors};
use sandpiper_robot::{ExecuteInstructions, MotorInstruction, Movement};

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.05)
}

fn tick_until_terminal(node: &mut Node, bb: &mut Blackboard, from_tick: u64) -> (Status, u64) {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut tick = from_tick;
    while Instant::now() < deadline {
        match node.tick(&ctx(tick), bb) {
            Status::Running => {
                tick += 1;
                std::thread::sleep(Duration::from_millis(5));
            }
            terminal => return (terminal, tick),
        }
    }
    panic!("script never finished");
}

#[test]
fn script_runs_in_background_and_succeeds_once() {
    let motors = Arc::new(MockMotors::new());
    let mut node = Node::new(
        "wiggle free",
        ExecuteInstructions::new(
            Arc::clone(&motors) as Arc<dyn Motors>,
            // Same two-step shape as the deployed recovery scripts (which
            // hold for 1.0 s then 0.5 s), with the holds scaled down to
            // 30 ms/20 ms so the run spans several polls without slowing
            // the suite.
            vec![
                MotorInstruction::new(Movement::Backward, 80, 0.03),
                MotorInstruction::new(Movement::Forward, 80, 0.02),
            ],
        ),
    );
    let mut bb = Blackboard::new();

    // First tick spawns the worker; the holds outlast several tick periods.
    assert_eq!(node.tick(&ctx(0), &mut bb), Status::Running);
    assert_eq!(node.tick(&ctx(1), &mut bb), Status::Running);

    let (status, tick) = tick_until_terminal(&mut node, &mut bb, 2);
    assert_eq!(status, Status::Success);

    let commands = motors.commands();
    // Backward pair, forward pair, trailing stop.
    assert_eq!(commands.len(), 5);
    assert!(matches!(
        commands[0],
        MotorCommand::Drive {
            direction: MotorDirection::Backward,
            ..
        }
    ));
    assert!(matches!(
        commands[2],
        MotorCommand::Drive {
            direction: MotorDirection::Forward,
            ..
        }
    ));
    assert_eq!(commands.last(), Some(&MotorCommand::Stop));

    // The completed run is consumed: the next tick starts a fresh one
    // instead of replaying the old result.
    motors.clear();
    assert_eq!(node.tick(&ctx(tick + 1), &mut bb), Status::Running);
    let (status, _) = tick_until_terminal(&mut node, &mut bb, tick + 2);
    assert_eq!(status, Status::Success);
    assert_eq!(motors.commands().len(), 5);
}

#[test]
fn empty_script_still_goes_through_the_worker() {
    let motors = Arc::new(MockMotors::new());
    let mut node = Node::new(
        "noop",
        ExecuteInstructions::new(Arc::clone(&motors) as Arc<dyn Motors>, Vec::new()),
    );
    let mut bb = Blackboard::new();

    assert_eq!(node.tick(&ctx(0), &mut bb), Status::Running);
    let (status, _) = tick_until_terminal(&mut node, &mut bb, 1);
    assert_eq!(status, Status::Success);
    // Only the trailing stop.
    assert_eq!(motors.commands(), vec![MotorCommand::Stop]);
}
