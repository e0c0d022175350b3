use crate::behaviour::Behaviour;
use crate::blackboard::{AccessDecl, Blackboard};
use crate::status::Status;
use crate::tick::TickContext;

/// Condition leaf: `Success` when the predicate holds, `Failure` otherwise.
pub struct Condition<F> {
    predicate: F,
    decl: AccessDecl,
}

impl<F> Condition<F>
where
    F: Fn(&TickContext, &Blackboard) -> bool + Send + 'static,
{
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            decl: AccessDecl::new(),
        }
    }

    pub fn with_access(mut self, decl: AccessDecl) -> Self {
        self.decl = decl;
        self
    }
}

impl<F> Behaviour for Condition<F>
where
    F: Fn(&TickContext, &Blackboard) -> bool + Send + 'static,
{
    fn update(&mut self, ctx: &TickContext, bb: &mut Blackboard) -> Status {
        if (self.predicate)(ctx, bb) {
            Status::Success
        } else {
            Status::Failure
        }
    }

    fn access(&self) -> AccessDecl {
        self.decl.clone()
    }
}
