//! Behavior tree evaluation kernel.
//!
//! Engine-agnostic tick semantics: composites, guard decorators and a typed
//! blackboard. Leaves that talk to hardware live in downstream crates; this
//! crate only defines the `Behaviour` contract they implement.

#![forbid(unsafe_code)]

pub mod behaviour;
pub mod blackboard;
pub mod composites;
pub mod decorators;
pub mod leaf;
pub mod status;
pub mod tick;

pub use behaviour::{Behaviour, Node};
pub use blackboard::{AccessDecl, BbKey, BbView, Blackboard};
pub use composites::{Parallel, Selector, Sequence};
pub use decorators::{EternalGuard, OneShot};
pub use leaf::Condition;
pub use status::{NodeState, Status};
pub use tick::TickContext;
