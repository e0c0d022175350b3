use std::borrow::Cow;

use crate::blackboard::{AccessDecl, Blackboard};
use crate::status::{NodeState, Status};
use crate::tick::TickContext;

/// The polymorphic unit of the tree.
///
/// Implementors provide `update`; the lifecycle hooks default to no-ops.
/// Lifecycle bookkeeping (when `initialise`/`terminate` fire) is owned by
/// [`Node`], not by implementors.
pub trait Behaviour: Send + 'static {
    /// One evaluation step. Must not block: long-running work is modelled as
    /// returning `Running` and being re-ticked next loop iteration.
    fn update(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status;

    /// Called on each transition into `Running` from a non-running state,
    /// before `update`.
    fn initialise(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) {}

    /// Called exactly once whenever the node leaves `Running`, including
    /// pre-emption by a sibling short-circuit. Release in-flight side
    /// effects here.
    fn terminate(&mut self, _ctx: &TickContext, _bb: &mut Blackboard, _status: Status) {}

    /// Declared blackboard access, for introspection and tests.
    fn access(&self) -> AccessDecl {
        AccessDecl::default()
    }
}

/// An owned tree node: a behaviour plus its name and lifecycle state.
///
/// `Node` drives the `{Uninitialised, Running, Success, Failure}` state
/// machine so every `Behaviour` gets identical initialise/terminate
/// semantics for free.
pub struct Node {
    name: Cow<'static, str>,
    state: NodeState,
    behaviour: Box<dyn Behaviour>,
}

impl Node {
    pub fn new(name: impl Into<Cow<'static, str>>, behaviour: impl Behaviour) -> Self {
        Self {
            name: name.into(),
            state: NodeState::Uninitialised,
            behaviour: Box::new(behaviour),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn access(&self) -> AccessDecl {
        self.behaviour.access()
    }

    /// One evaluation pass: fire `initialise` when entering `Running` from a
    /// non-running state, run `update`, fire `terminate` on a terminal
    /// result.
    pub fn tick(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        if self.state != NodeState::Running {
            self.behaviour.initialise(ctx, bb);
        }

        let status = self.behaviour.update(ctx, bb);
        if status.is_terminal() {
            self.behaviour.terminate(ctx, bb, status);
        }

        self.state = status.into();
        status
    }

    /// Pre-empt a running node without ticking it.
    ///
    /// `terminate` fires only if the node was actually `Running`; stopping an
    /// idle node just records the new state.
    pub fn stop(&mut self, ctx: &TickContext, bb: &mut Blackboard, status: Status) {
        if self.state == NodeState::Running {
            self.behaviour.terminate(ctx, bb, status);
        }
        self.state = status.into();
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
