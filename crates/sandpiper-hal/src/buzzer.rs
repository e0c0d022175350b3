use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::HalError;

/// Event jingles the robot plays while operating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Melody {
    CanFound,
    AboutToCollide,
    RobotStuck,
}

pub trait Buzzer: Send + Sync {
    fn setup(&self) -> Result<(), HalError>;

    /// Non-blocking: real drivers render the melody on their own thread.
    fn play(&self, melody: Melody);

    fn disable(&self);
}

#[derive(Debug, Default)]
pub struct MockBuzzer {
    played: Mutex<Vec<Melody>>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Melody> {
        self.played.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Buzzer for MockBuzzer {
    fn setup(&self) -> Result<(), HalError> {
        info!("mock buzzer ready");
        Ok(())
    }

    fn play(&self, melody: Melody) {
        debug!(?melody, "buzzer play");
        self.played
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(melody);
    }

    fn disable(&self) {
        info!("mock buzzer disabled");
    }
}
