use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::HalError;

/// The three servo pairs on the chassis: the pick-up arm, its claw, and the
/// collection tray latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ServoPair {
    Arm,
    Claw,
    Tray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoState {
    Expanded,
    Retracted,
}

impl ServoState {
    pub fn toggled(self) -> Self {
        match self {
            ServoState::Expanded => ServoState::Retracted,
            ServoState::Retracted => ServoState::Expanded,
        }
    }
}

pub trait Servos: Send + Sync {
    fn setup(&self) -> Result<(), HalError>;

    fn move_to(&self, pair: ServoPair, state: ServoState);

    fn toggle(&self, pair: ServoPair);

    fn disable(&self);
}

/// Host mock tracking the commanded state of each pair.
#[derive(Debug)]
pub struct MockServos {
    states: Mutex<BTreeMap<ServoPair, ServoState>>,
}

impl MockServos {
    pub fn new() -> Self {
        let mut states = BTreeMap::new();
        for pair in [ServoPair::Arm, ServoPair::Claw, ServoPair::Tray] {
            states.insert(pair, ServoState::Retracted);
        }
        Self {
            states: Mutex::new(states),
        }
    }

    pub fn state_of(&self, pair: ServoPair) -> ServoState {
        self.states.lock().unwrap_or_else(|e| e.into_inner())[&pair]
    }
}

impl Default for MockServos {
    fn default() -> Self {
        Self::new()
    }
}

impl Servos for MockServos {
    fn setup(&self) -> Result<(), HalError> {
        info!("mock servos ready");
        Ok(())
    }

    fn move_to(&self, pair: ServoPair, state: ServoState) {
        debug!(?pair, ?state, "servo move");
        self.states
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(pair, state);
    }

    fn toggle(&self, pair: ServoPair) {
        let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        let next = states[&pair].toggled();
        debug!(?pair, ?next, "servo toggle");
        states.insert(pair, next);
    }

    fn disable(&self) {
        info!("mock servos disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let servos = MockServos::new();
        assert_eq!(servos.state_of(ServoPair::Claw), ServoState::Retracted);
        servos.toggle(ServoPair::Claw);
        assert_eq!(servos.state_of(ServoPair::Claw), ServoState::Expanded);
        servos.move_to(ServoPair::Claw, ServoState::Retracted);
        assert_eq!(servos.state_of(ServoPair::Claw), ServoState::Retracted);
    }
}
