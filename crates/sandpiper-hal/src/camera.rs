use std::sync::Mutex;

use tracing::info;

use crate::error::HalError;

/// One captured camera frame. Pixel data stays inside the vision
/// collaborators; the core only needs the geometry to reason about
/// detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn center_x(&self) -> i32 {
        self.x + (self.width as i32) / 2
    }
}

/// An object reported by the detector for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub category: String,
    pub score: f32,
    pub bounding_box: BoundingBox,
}

pub trait Camera: Send + Sync {
    fn setup(&self) -> Result<(), HalError>;

    /// The most recent frame, or `None` when capture dropped a frame.
    fn current_frame(&self) -> Option<Frame>;

    fn disable(&self);
}

/// Object-detection inference over a frame. The model lives outside the
/// core; this is the full surface the tree needs.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, frame: &Frame) -> Vec<Detection>;
}

/// Pure water-boundary decision over a frame. The real classifier lives with
/// the vision collaborators; the tree only needs the verdict.
pub type WaterStrategy = fn(&Frame) -> bool;

/// A shoreline detector that never triggers, for platforms without the
/// vision stack.
pub fn no_water_strategy(_frame: &Frame) -> bool {
    false
}

#[derive(Debug)]
pub struct MockCamera {
    frame: Option<Frame>,
}

impl MockCamera {
    pub fn new() -> Self {
        Self {
            frame: Some(Frame::new(640, 480)),
        }
    }

    /// A camera that never produces frames, for dropped-frame paths.
    pub fn dark() -> Self {
        Self { frame: None }
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for MockCamera {
    fn setup(&self) -> Result<(), HalError> {
        info!("mock camera ready");
        Ok(())
    }

    fn current_frame(&self) -> Option<Frame> {
        self.frame
    }

    fn disable(&self) {
        info!("mock camera disabled");
    }
}

/// Detector mock replaying scripted detection lists, one per `detect` call,
/// repeating the last entry once exhausted.
#[derive(Debug, Default)]
pub struct MockDetector {
    script: Vec<Vec<Detection>>,
    at: Mutex<usize>,
}

impl MockDetector {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn scripted(script: Vec<Vec<Detection>>) -> Self {
        Self {
            script,
            at: Mutex::new(0),
        }
    }

    /// A centered can detection, handy default for tests.
    pub fn can_at(x: i32, width: u32, height: u32) -> Detection {
        Detection {
            category: "can".to_string(),
            score: 0.9,
            bounding_box: BoundingBox {
                x,
                y: 100,
                width,
                height,
            },
        }
    }
}

impl ObjectDetector for MockDetector {
    fn detect(&self, _frame: &Frame) -> Vec<Detection> {
        if self.script.is_empty() {
            return Vec::new();
        }
        let mut at = self.at.lock().unwrap_or_else(|e| e.into_inner());
        let detections = self.script[(*at).min(self.script.len() - 1)].clone();
        *at += 1;
        detections
    }
}
