use std::sync::Mutex;
use std::sync::Arc;

use sandpiper_bt::{
    BbKey, Behaviour, Blackboard, EternalGuard, Node, OneShot, Status, TickContext,
};

const DISTANCE: BbKey<f32> = BbKey::new(1, "distance");
const OTHER: BbKey<f32> = BbKey::new(2, "other");

type EventLog = Arc<Mutex<Vec<String>>>;

struct Counting {
    status: Status,
    log: EventLog,
}

impl Counting {
    fn node(status: Status, log: &EventLog) -> Node {
        Node::new(
            "child",
            Self {
                status,
                log: Arc::clone(log),
            },
        )
    }
}

impl Behaviour for Counting {
    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        self.log.lock().unwrap().push("update".into());
        self.status
    }

    fn terminate(&mut self, _ctx: &TickContext, _bb: &mut Blackboard, status: Status) {
        self.log.lock().unwrap().push(format!("term:{status:?}"));
    }
}

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1)
}

fn count(log: &EventLog, event: &str) -> usize {
    log.lock().unwrap().iter().filter(|e| *e == event).count()
}

#[test]
fn eternal_guard_aborts_running_child_when_condition_flips() {
    // Scenario D: distance below threshold for three ticks, then above.
    let log: EventLog = Arc::default();
    let mut guard = Node::new(
        "about to crash?",
        EternalGuard::new(Counting::node(Status::Running, &log), |view| {
            view.get(DISTANCE).is_some_and(|d| *d < 15.0)
        })
        .reading(DISTANCE),
    );

    let mut bb = Blackboard::new();
    bb.set(DISTANCE, 10.0);
    for tick in 0..3 {
        assert_eq!(guard.tick(&ctx(tick), &mut bb), Status::Running);
    }
    assert_eq!(count(&log, "update"), 3);

    bb.set(DISTANCE, 50.0);
    assert_eq!(guard.tick(&ctx(3), &mut bb), Status::Failure);

    // terminate fired, and the child was not ticked on the aborting tick.
    assert_eq!(count(&log, "term:Failure"), 1);
    assert_eq!(count(&log, "update"), 3);
}

#[test]
fn eternal_guard_recovers_when_condition_holds_again() {
    let log: EventLog = Arc::default();
    let mut guard = Node::new(
        "guard",
        EternalGuard::new(Counting::node(Status::Running, &log), |view| {
            view.get(DISTANCE).is_some_and(|d| *d < 15.0)
        })
        .reading(DISTANCE),
    );

    let mut bb = Blackboard::new();
    bb.set(DISTANCE, 10.0);
    assert_eq!(guard.tick(&ctx(0), &mut bb), Status::Running);
    bb.set(DISTANCE, 50.0);
    assert_eq!(guard.tick(&ctx(1), &mut bb), Status::Failure);
    bb.set(DISTANCE, 10.0);
    assert_eq!(guard.tick(&ctx(2), &mut bb), Status::Running);
    assert_eq!(count(&log, "update"), 2);
}

#[test]
fn eternal_guard_fails_closed_when_key_missing() {
    let log: EventLog = Arc::default();
    let mut guard = Node::new(
        "guard",
        EternalGuard::new(Counting::node(Status::Success, &log), |view| {
            view.get(DISTANCE).is_some_and(|d| *d < 15.0)
        })
        .reading(DISTANCE),
    );

    let mut bb = Blackboard::new();
    assert_eq!(guard.tick(&ctx(0), &mut bb), Status::Failure);
    assert_eq!(count(&log, "update"), 0);
}

#[test]
fn eternal_guard_view_hides_undeclared_keys() {
    // The condition reads a key it never declared; the restricted view must
    // return None even though the key is set, so the guard fails closed.
    let log: EventLog = Arc::default();
    let mut guard = Node::new(
        "guard",
        EternalGuard::new(Counting::node(Status::Success, &log), |view| {
            view.get(OTHER).is_some()
        })
        .reading(DISTANCE),
    );

    let mut bb = Blackboard::new();
    bb.set(OTHER, 1.0);
    assert_eq!(guard.tick(&ctx(0), &mut bb), Status::Failure);
}

#[test]
fn oneshot_caches_terminal_status() {
    let log: EventLog = Arc::default();
    let mut shot = Node::new(
        "oneshot",
        OneShot::new(Node::new(
            "child",
            ScriptedOnce {
                script: vec![Status::Running, Status::Success],
                at: 0,
                log: Arc::clone(&log),
            },
        )),
    );

    let mut bb = Blackboard::new();
    assert_eq!(shot.tick(&ctx(0), &mut bb), Status::Running);
    assert_eq!(shot.tick(&ctx(1), &mut bb), Status::Success);

    // Cached from here on: the child is never re-ticked.
    for tick in 2..6 {
        assert_eq!(shot.tick(&ctx(tick), &mut bb), Status::Success);
    }
    assert_eq!(count(&log, "update"), 2);
}

#[test]
fn oneshot_reset_reruns_child() {
    let log: EventLog = Arc::default();
    let mut shot = OneShot::new(Counting::node(Status::Failure, &log));
    let mut bb = Blackboard::new();

    assert_eq!(shot.update(&ctx(0), &mut bb), Status::Failure);
    assert_eq!(shot.update(&ctx(1), &mut bb), Status::Failure);
    assert_eq!(count(&log, "update"), 1);
    assert_eq!(shot.completed(), Some(Status::Failure));

    shot.reset();
    assert_eq!(shot.update(&ctx(2), &mut bb), Status::Failure);
    assert_eq!(count(&log, "update"), 2);
}

struct ScriptedOnce {
    script: Vec<Status>,
    at: usize,
    log: EventLog,
}

impl Behaviour for ScriptedOnce {
    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        self.log.lock().unwrap().push("update".into());
        let status = self.script[self.at.min(self.script.len() - 1)];
        self.at += 1;
        status
    }
}
