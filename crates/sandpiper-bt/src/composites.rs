use crate::behaviour::{Behaviour, Node};
use crate::blackboard::Blackboard;
use crate::status::{NodeState, Status};
use crate::tick::TickContext;

/// Ticks children left-to-right, failing fast.
///
/// Without memory the sequence restarts from the first child every tick, so
/// earlier conditions are re-checked while a later child is `Running`. With
/// memory it resumes from the last running child, skipping already-succeeded
/// siblings; memory is cleared whenever the sequence itself returns a
/// terminal status.
pub struct Sequence {
    children: Vec<Node>,
    memory: bool,
    current: usize,
}

impl Sequence {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            memory: false,
            current: 0,
        }
    }

    pub fn with_memory(children: Vec<Node>) -> Self {
        Self {
            children,
            memory: true,
            current: 0,
        }
    }
}

impl Behaviour for Sequence {
    fn initialise(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) {
        self.current = 0;
    }

    fn update(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let start = if self.memory { self.current } else { 0 };

        for i in start..self.children.len() {
            match self.children[i].tick(ctx, bb) {
                Status::Running => {
                    self.current = i;
                    return Status::Running;
                }
                Status::Failure => return Status::Failure,
                Status::Success => {}
            }
        }

        Status::Success
    }

    fn terminate(&mut self, ctx: &TickContext, bb: &mut Blackboard, status: Status) {
        self.current = 0;
        stop_running_children(&mut self.children, ctx, bb, status);
    }
}

/// Priority list: ticks children left-to-right until one succeeds or runs.
///
/// Mirrors [`Sequence`]: without memory every tick re-evaluates from the
/// highest-priority child, which is what lets a higher-priority branch
/// pre-empt a running lower-priority one.
pub struct Selector {
    children: Vec<Node>,
    memory: bool,
    current: usize,
}

impl Selector {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            memory: false,
            current: 0,
        }
    }

    pub fn with_memory(children: Vec<Node>) -> Self {
        Self {
            children,
            memory: true,
            current: 0,
        }
    }
}

impl Behaviour for Selector {
    fn initialise(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) {
        self.current = 0;
    }

    fn update(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let start = if self.memory { self.current } else { 0 };

        for i in start..self.children.len() {
            match self.children[i].tick(ctx, bb) {
                Status::Running => {
                    self.current = i;
                    return Status::Running;
                }
                Status::Success => return Status::Success,
                Status::Failure => {}
            }
        }

        Status::Failure
    }

    fn terminate(&mut self, ctx: &TickContext, bb: &mut Blackboard, status: Status) {
        self.current = 0;
        stop_running_children(&mut self.children, ctx, bb, status);
    }
}

/// SuccessOnAll, synchronized: every child is ticked every tick, then the
/// parallel's own status is computed. Any child failing fails the parallel;
/// `Success` only once all children succeeded in the same tick.
///
/// Children must not depend on a sibling's same-tick result: evaluation
/// order within the parallel is unspecified.
pub struct Parallel {
    children: Vec<Node>,
}

impl Parallel {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

impl Behaviour for Parallel {
    fn update(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let mut all_success = true;
        let mut any_failure = false;

        for child in self.children.iter_mut() {
            match child.tick(ctx, bb) {
                Status::Success => {}
                Status::Failure => {
                    any_failure = true;
                    all_success = false;
                }
                Status::Running => all_success = false,
            }
        }

        if any_failure {
            Status::Failure
        } else if all_success {
            Status::Success
        } else {
            Status::Running
        }
    }

    fn terminate(&mut self, ctx: &TickContext, bb: &mut Blackboard, status: Status) {
        stop_running_children(&mut self.children, ctx, bb, status);
    }
}

/// Pre-empt children still running when the composite reaches a terminal
/// status, so their `terminate` hooks release in-flight side effects.
fn stop_running_children(
    children: &mut [Node],
    ctx: &TickContext,
    bb: &mut Blackboard,
    status: Status,
) {
    for child in children.iter_mut() {
        if child.state() == NodeState::Running {
            child.stop(ctx, bb, status);
        }
    }
}
