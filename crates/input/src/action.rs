use facecube_common::FaceClick;

/// A high-level action the shell understands.
///
/// Window backends and scripted sessions both produce these, so the shell
/// logic is the same whichever drives it.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The cube reported a hit on a face.
    ClickFace(FaceClick),
    /// The inline editor's text changed.
    TextChanged(String),
    /// Commit the edit buffer.
    Submit,
    /// Input that maps to nothing.
    Noop,
}

/// Key identity, reduced to what the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// A keystroke in the inline editor together with the editor's text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub text: String,
}

impl KeyInput {
    pub fn new(key: Key, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }

    pub fn enter(text: impl Into<String>) -> Self {
        Self::new(Key::Enter, text)
    }

    /// Enter commits; every other key only replaces the buffer.
    pub fn to_action(&self) -> Action {
        match self.key {
            Key::Enter => Action::Submit,
            Key::Other => Action::TextChanged(self.text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facecube_common::FaceId;

    #[test]
    fn enter_maps_to_submit() {
        assert_eq!(KeyInput::enter("Hi").to_action(), Action::Submit);
    }

    #[test]
    fn other_keys_map_to_text_change() {
        let input = KeyInput::new(Key::Other, "H");
        assert_eq!(input.to_action(), Action::TextChanged("H".into()));
    }

    #[test]
    fn click_action_carries_face() {
        let a = Action::ClickFace(FaceClick::new(FaceId::Top));
        assert!(matches!(a, Action::ClickFace(c) if c.face == FaceId::Top));
    }

    #[test]
    fn noop_is_constructible() {
        assert!(matches!(Action::Noop, Action::Noop));
    }
}
