use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::HalError;

/// Small status display on the chassis.
pub trait Display: Send + Sync {
    fn setup(&self) -> Result<(), HalError>;

    fn show(&self, text: &str);

    fn clear(&self);

    fn disable(&self);
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    lines: Mutex<Vec<String>>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Display for MockDisplay {
    fn setup(&self) -> Result<(), HalError> {
        info!("mock display ready");
        Ok(())
    }

    fn show(&self, text: &str) {
        debug!(text, "display");
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
    }

    fn clear(&self) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn disable(&self) {
        info!("mock display disabled");
    }
}
