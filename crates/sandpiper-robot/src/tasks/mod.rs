//! Task subtrees, one module per behaviour. Each exposes a `subtree`
//! constructor returning a guarded branch ready to slot into the priority
//! selector.

pub mod cans;
pub mod crash;
pub mod patrol;
pub mod stuck;
pub mod water;

use std::sync::Arc;

use sandpiper_bt::{Behaviour, Blackboard, Status, TickContext};
use sandpiper_hal::{Buzzer, Melody};

/// Plays one melody and succeeds. Shared by the reactive branches that
/// announce themselves audibly.
pub struct PlayMelody {
    buzzer: Arc<dyn Buzzer>,
    melody: Melody,
}

impl PlayMelody {
    pub fn new(buzzer: Arc<dyn Buzzer>, melody: Melody) -> Self {
        Self { buzzer, melody }
    }
}

impl Behaviour for PlayMelody {
    fn update(&mut self, _ctx: &TickContext, _bb: &mut Blackboard) -> Status {
        self.buzzer.play(self.melody);
        Status::Success
    }
}
