use facecube_common::{FaceId, ScreenPos};

/// An open inline edit on one face.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    target: FaceId,
    buffer: String,
    anchor: Option<ScreenPos>,
}

impl EditSession {
    /// Open an edit seeded with the face's current label.
    pub fn open(target: FaceId, seed: &str, anchor: Option<ScreenPos>) -> Self {
        Self {
            target,
            buffer: seed.to_owned(),
            anchor,
        }
    }

    pub fn target(&self) -> FaceId {
        self.target
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Fixed at click time; camera motion afterwards does not move it.
    pub fn anchor(&self) -> Option<ScreenPos> {
        self.anchor
    }

    pub fn set_buffer(&mut self, text: String) {
        self.buffer = text;
    }

    /// Close the session, yielding the label to commit.
    pub fn finish(self) -> (FaceId, String) {
        (self.target, self.buffer)
    }
}

/// Where and what the inline editor shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorOverlay<'a> {
    pub face: FaceId,
    pub text: &'a str,
    pub anchor: ScreenPos,
}
