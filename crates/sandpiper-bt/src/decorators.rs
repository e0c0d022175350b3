use crate::behaviour::{Behaviour, Node};
use crate::blackboard::{AccessDecl, BbKey, BbView, Blackboard};
use crate::status::{NodeState, Status};
use crate::tick::TickContext;

/// Condition-gated subtree: the condition is re-evaluated on every tick,
/// before the child.
///
/// When the condition flips to false while the child is running, the child
/// is stopped with `Failure` (its `terminate` hook fires synchronously)
/// before the guard returns, and the child is not ticked that tick.
///
/// The condition receives a read-only blackboard view restricted to the
/// keys declared via [`EternalGuard::reading`]; missing or undeclared keys
/// read as `None`, so conditions that cannot evaluate fail closed.
pub struct EternalGuard {
    child: Node,
    condition: Box<dyn Fn(&BbView<'_>) -> bool + Send>,
    key_ids: Vec<u64>,
    decl: AccessDecl,
}

impl EternalGuard {
    pub fn new(child: Node, condition: impl Fn(&BbView<'_>) -> bool + Send + 'static) -> Self {
        Self {
            child,
            condition: Box::new(condition),
            key_ids: Vec::new(),
            decl: AccessDecl::new(),
        }
    }

    /// Declare a blackboard key the condition reads.
    pub fn reading<T: 'static>(mut self, key: BbKey<T>) -> Self {
        self.key_ids.push(key.id());
        self.decl = self.decl.read(key);
        self
    }
}

impl Behaviour for EternalGuard {
    fn update(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        let pass = {
            let view = bb.view(&self.key_ids);
            (self.condition)(&view)
        };

        if !pass {
            if self.child.state() == NodeState::Running {
                self.child.stop(ctx, bb, Status::Failure);
            }
            return Status::Failure;
        }

        self.child.tick(ctx, bb)
    }

    fn terminate(&mut self, ctx: &TickContext, bb: &mut Blackboard, status: Status) {
        if self.child.state() == NodeState::Running {
            self.child.stop(ctx, bb, status);
        }
    }

    fn access(&self) -> AccessDecl {
        self.decl.clone()
    }
}

/// Runs its child until the first terminal status, then replays that status
/// on every subsequent tick without re-ticking the child.
pub struct OneShot {
    child: Node,
    completed: Option<Status>,
}

impl OneShot {
    pub fn new(child: Node) -> Self {
        Self {
            child,
            completed: None,
        }
    }

    /// Forget the cached result so the child runs again on the next tick.
    pub fn reset(&mut self) {
        self.completed = None;
    }

    pub fn completed(&self) -> Option<Status> {
        self.completed
    }
}

impl Behaviour for OneShot {
    fn update(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        if let Some(status) = self.completed {
            return status;
        }

        let status = self.child.tick(ctx, bb);
        if status.is_terminal() {
            self.completed = Some(status);
        }
        status
    }

    fn terminate(&mut self, ctx: &TickContext, bb: &mut Blackboard, status: Status) {
        if self.child.state() == NodeState::Running {
            self.child.stop(ctx, bb, status);
        }
    }
}
