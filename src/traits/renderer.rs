use crate::composer::FrameSnapshot;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Canvas abstraction - consumes immutable frame snapshots and presents them.
/// The scene layer never talks to a graphics API directly.
pub trait SceneRenderer {
    /// Present one frame of the scene
    fn render(&mut self, snapshot: &FrameSnapshot) -> Result<()>;

    /// Surface size change notification
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Headless sink - counts frames and discards them. Used for smoke runs
/// without a window.
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl SceneRenderer for NullRenderer {
    fn render(&mut self, _snapshot: &FrameSnapshot) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

/// Test sink - keeps every snapshot it is handed.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub snapshots: Vec<FrameSnapshot>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.snapshots.last()
    }
}

impl SceneRenderer for RecordingRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot) -> Result<()> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}
