use facecube_common::ScreenPos;
use glam::Vec2;

/// Max pointer travel between press and release that still counts as a click.
pub const CLICK_SLOP_PX: f32 = 4.0;

/// Splits primary-button gestures into clicks and orbit drags.
#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor: Option<ScreenPos>,
    pressed_at: Option<ScreenPos>,
    travel: f32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<ScreenPos> {
        self.cursor
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Record a cursor move. Returns the drag delta while the button is held.
    pub fn moved(&mut self, pos: ScreenPos) -> Option<Vec2> {
        let previous = self.cursor.replace(pos);
        if self.pressed_at.is_none() {
            return None;
        }
        let delta = pos - previous.unwrap_or(pos);
        self.travel += delta.length();
        Some(delta)
    }

    pub fn pressed(&mut self) {
        self.pressed_at = self.cursor;
        self.travel = 0.0;
    }

    /// Returns the click position if the gesture stayed within the slop.
    pub fn released(&mut self) -> Option<ScreenPos> {
        let start = self.pressed_at.take()?;
        if self.travel > CLICK_SLOP_PX {
            tracing::trace!(travel = self.travel, "pointer gesture was a drag");
            return None;
        }
        Some(self.cursor.unwrap_or(start))
    }

    pub fn left_window(&mut self) {
        self.cursor = None;
        self.pressed_at = None;
    }
}
