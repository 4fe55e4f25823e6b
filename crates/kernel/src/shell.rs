use crate::{EditSession, EditorOverlay};
use facecube_common::{FaceClick, FaceId, FaceMap, InvalidFaceIndex, ScreenPos};
use facecube_input::{Action, KeyInput};
use facecube_texture::{Surface, TextureMode, TextureSynthesizer};
use serde::{Deserialize, Serialize};

/// Which of the two widget behaviors the shell runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubeVariant {
    /// Clicking a face reveals its color name. One way; never hides again.
    Reveal,
    /// Clicking a face opens an inline editor for a custom label.
    Label,
}

/// Mutable per-face state owned by the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceState {
    pub label: String,
    pub revealed: bool,
}

/// An event record produced by every shell state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShellEvent {
    /// A face's color name became visible.
    Revealed { face: FaceId },
    /// An edit session opened on a face.
    EditStarted {
        face: FaceId,
        anchor: Option<ScreenPos>,
    },
    /// An open edit was dropped without committing (another face was clicked).
    EditAbandoned { face: FaceId },
    /// The edit buffer changed.
    BufferChanged { face: FaceId, text: String },
    /// The edit buffer was written to the face label.
    Committed { face: FaceId, label: String },
}

/// Errors from feeding the shell input that did not come from the cube.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    InvalidFace(#[from] InvalidFaceIndex),
}

/// The authoritative widget state.
///
/// Owns one label/reveal record and one surface slot per face. Renderers
/// read [`Shell::surfaces`]; nothing outside the shell replaces a slot.
pub struct Shell {
    variant: CubeVariant,
    faces: FaceMap<FaceState>,
    surfaces: FaceMap<Surface>,
    edit: Option<EditSession>,
    synthesizer: TextureSynthesizer,
    event_log: Vec<ShellEvent>,
}

impl Shell {
    /// All labels empty and all faces hidden.
    pub fn new(variant: CubeVariant) -> Self {
        Self::with_synthesizer(variant, TextureSynthesizer::new())
    }

    pub fn with_synthesizer(variant: CubeVariant, synthesizer: TextureSynthesizer) -> Self {
        let faces = FaceMap::<FaceState>::default();
        let surfaces = FaceMap::from_fn(|face| {
            rasterize(&synthesizer, variant, face, faces.get(face))
        });
        tracing::debug!(?variant, "shell created");
        Self {
            variant,
            faces,
            surfaces,
            edit: None,
            synthesizer,
            event_log: Vec::new(),
        }
    }

    pub fn variant(&self) -> CubeVariant {
        self.variant
    }

    pub fn face(&self, face: FaceId) -> &FaceState {
        self.faces.get(face)
    }

    pub fn faces(&self) -> &FaceMap<FaceState> {
        &self.faces
    }

    /// Committed labels in face index order.
    pub fn labels(&self) -> [&str; 6] {
        FaceId::ALL.map(|face| self.faces.get(face).label.as_str())
    }

    /// The current surface snapshot for rendering.
    pub fn surfaces(&self) -> &FaceMap<Surface> {
        &self.surfaces
    }

    pub fn edit(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// The inline editor, present only with an edit target and a known anchor.
    pub fn editor_overlay(&self) -> Option<EditorOverlay<'_>> {
        let edit = self.edit.as_ref()?;
        Some(EditorOverlay {
            face: edit.target(),
            text: edit.buffer(),
            anchor: edit.anchor()?,
        })
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[ShellEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Dispatch an input action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ClickFace(click) => self.on_face_clicked(click),
            Action::TextChanged(text) => self.on_text_changed(text),
            Action::Submit => {
                self.on_submit();
            }
            Action::Noop => {}
        }
    }

    /// React to the cube reporting a hit on `click.face`.
    pub fn on_face_clicked(&mut self, click: FaceClick) {
        let face = click.face;
        match self.variant {
            CubeVariant::Reveal => {
                if self.faces.get(face).revealed {
                    tracing::debug!(%face, "face already revealed");
                    return;
                }
                self.replace_face(
                    face,
                    FaceState {
                        revealed: true,
                        ..self.faces.get(face).clone()
                    },
                );
                self.event_log.push(ShellEvent::Revealed { face });
            }
            CubeVariant::Label => {
                if let Some(previous) = self.edit.take() {
                    self.event_log.push(ShellEvent::EditAbandoned {
                        face: previous.target(),
                    });
                }
                let seed = &self.faces.get(face).label;
                self.edit = Some(EditSession::open(face, seed, click.anchor));
                tracing::debug!(%face, anchor = ?click.anchor, "edit started");
                self.event_log.push(ShellEvent::EditStarted {
                    face,
                    anchor: click.anchor,
                });
            }
        }
    }

    /// Click reported by raw index, e.g. from a script. Rejects indices outside `0..6`.
    pub fn on_face_index_clicked(
        &mut self,
        index: usize,
        anchor: Option<ScreenPos>,
    ) -> Result<(), ShellError> {
        let face = FaceId::from_index(index)?;
        self.on_face_clicked(FaceClick { face, anchor });
        Ok(())
    }

    /// Replace the edit buffer. Never commits. Ignored while idle.
    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        let Some(edit) = self.edit.as_mut() else {
            tracing::debug!("text change with no edit target ignored");
            return;
        };
        let text = text.into();
        edit.set_buffer(text.clone());
        self.event_log.push(ShellEvent::BufferChanged {
            face: edit.target(),
            text,
        });
    }

    /// Commit the buffer to the target face and return to idle.
    ///
    /// Returns the committed face, or `None` when no edit was open.
    pub fn on_submit(&mut self) -> Option<FaceId> {
        let (face, label) = self.edit.take()?.finish();
        if self.faces.get(face).label != label {
            self.replace_face(
                face,
                FaceState {
                    label: label.clone(),
                    ..self.faces.get(face).clone()
                },
            );
        }
        tracing::debug!(%face, chars = label.chars().count(), "edit committed");
        self.event_log.push(ShellEvent::Committed { face, label });
        Some(face)
    }

    /// Keyboard entry point: Enter submits, anything else updates the buffer.
    pub fn on_key(&mut self, input: &KeyInput) {
        self.apply(input.to_action());
    }

    /// Store the new state and swap in its surface, built before the swap.
    fn replace_face(&mut self, face: FaceId, state: FaceState) {
        let surface = rasterize(&self.synthesizer, self.variant, face, &state);
        self.faces.replace(face, state);
        let old = self.surfaces.replace(face, surface);
        tracing::debug!(
            %face,
            old = %old.id(),
            new = %self.surfaces.get(face).id(),
            "surface slot replaced"
        );
    }
}

fn rasterize(
    synthesizer: &TextureSynthesizer,
    variant: CubeVariant,
    face: FaceId,
    state: &FaceState,
) -> Surface {
    let spec = face.spec();
    match variant {
        CubeVariant::Reveal => synthesizer.synthesize(
            spec.name,
            spec.color,
            TextureMode::Reveal {
                show_text: state.revealed,
            },
        ),
        CubeVariant::Label => synthesizer.synthesize(&state.label, spec.color, TextureMode::Label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facecube_input::Key;
    use facecube_texture::SurfaceId;
    use glam::Vec2;

    fn slot_ids(shell: &Shell) -> [SurfaceId; 6] {
        FaceId::ALL.map(|face| shell.surfaces().get(face).id())
    }

    #[test]
    fn new_shell_starts_idle_and_hidden() {
        let shell = Shell::new(CubeVariant::Reveal);
        assert!(!shell.is_editing());
        assert!(shell.faces().iter().all(|(_, f)| !f.revealed));
        assert_eq!(shell.labels(), ["", "", "", "", "", ""]);
        assert!(shell.events().is_empty());
    }

    #[test]
    fn reveal_touches_only_clicked_face() {
        for clicked in FaceId::ALL {
            let mut shell = Shell::new(CubeVariant::Reveal);
            let before = slot_ids(&shell);
            shell.on_face_clicked(FaceClick::new(clicked));
            let after = slot_ids(&shell);
            for face in FaceId::ALL {
                if face == clicked {
                    assert!(shell.face(face).revealed);
                    assert_ne!(before[face.index()], after[face.index()]);
                } else {
                    assert!(!shell.face(face).revealed);
                    assert_eq!(before[face.index()], after[face.index()]);
                }
            }
        }
    }

    #[test]
    fn reveal_is_one_way() {
        let mut shell = Shell::new(CubeVariant::Reveal);
        shell.on_face_clicked(FaceClick::new(FaceId::Top));
        let id = shell.surfaces().get(FaceId::Top).id();
        shell.on_face_clicked(FaceClick::new(FaceId::Top));
        assert!(shell.face(FaceId::Top).revealed);
        assert_eq!(shell.surfaces().get(FaceId::Top).id(), id);
        assert_eq!(shell.events().len(), 1);
    }

    #[test]
    fn reveal_variant_has_no_editor() {
        let mut shell = Shell::new(CubeVariant::Reveal);
        shell.on_face_clicked(FaceClick::with_anchor(FaceId::Front, Vec2::new(5.0, 5.0)));
        assert!(!shell.is_editing());
        assert!(shell.editor_overlay().is_none());
        shell.on_text_changed("ignored");
        assert_eq!(shell.on_submit(), None);
    }

    #[test]
    fn label_scenario_click_type_enter() {
        let mut shell = Shell::new(CubeVariant::Label);
        let before = slot_ids(&shell);

        shell.apply(Action::ClickFace(FaceClick::with_anchor(
            FaceId::Top,
            Vec2::new(640.0, 300.0),
        )));
        assert!(shell.is_editing());
        shell.apply(KeyInput::new(Key::Other, "H").to_action());
        shell.apply(KeyInput::new(Key::Other, "Hi").to_action());
        shell.apply(KeyInput::enter("Hi").to_action());

        assert_eq!(shell.labels(), ["", "", "Hi", "", "", ""]);
        assert!(!shell.is_editing());
        let after = slot_ids(&shell);
        for face in FaceId::ALL {
            assert_eq!(
                before[face.index()] == after[face.index()],
                face != FaceId::Top,
                "slot {face}"
            );
        }
    }

    #[test]
    fn non_enter_keys_never_commit() {
        let mut shell = Shell::new(CubeVariant::Label);
        shell.on_face_clicked(FaceClick::new(FaceId::Left));
        for text in ["a", "ab", "abc"] {
            shell.apply(KeyInput::new(Key::Other, text).to_action());
            assert_eq!(shell.face(FaceId::Left).label, "");
        }
        assert_eq!(shell.edit().map(|e| e.buffer()), Some("abc"));
    }

    #[test]
    fn click_seeds_buffer_with_current_label() {
        let mut shell = Shell::new(CubeVariant::Label);
        shell.on_face_clicked(FaceClick::new(FaceId::Back));
        shell.on_text_changed("Note");
        shell.on_submit();
        shell.on_face_clicked(FaceClick::new(FaceId::Back));
        assert_eq!(shell.edit().map(|e| e.buffer()), Some("Note"));
    }

    #[test]
    fn empty_submit_clears_label() {
        let mut shell = Shell::new(CubeVariant::Label);
        shell.on_face_clicked(FaceClick::new(FaceId::Front));
        shell.on_text_changed("Hello");
        shell.on_submit();
        let labeled = shell.surfaces().get(FaceId::Front).clone();

        shell.on_face_clicked(FaceClick::new(FaceId::Front));
        shell.on_text_changed("");
        assert_eq!(shell.on_submit(), Some(FaceId::Front));

        assert_eq!(shell.face(FaceId::Front).label, "");
        let cleared = shell.surfaces().get(FaceId::Front);
        assert!(!cleared.same_pixels(&labeled));
        assert!(
            cleared
                .pixels()
                .chunks_exact(4)
                .all(|px| px == [255, 255, 255, 255])
        );
    }

    #[test]
    fn unchanged_submit_keeps_slot() {
        let mut shell = Shell::new(CubeVariant::Label);
        let id = shell.surfaces().get(FaceId::Right).id();
        shell.on_face_clicked(FaceClick::new(FaceId::Right));
        shell.on_submit();
        assert_eq!(shell.surfaces().get(FaceId::Right).id(), id);
    }

    #[test]
    fn clicking_another_face_retargets_and_drops_buffer() {
        let mut shell = Shell::new(CubeVariant::Label);
        shell.on_face_clicked(FaceClick::new(FaceId::Right));
        shell.on_text_changed("draft");
        shell.on_face_clicked(FaceClick::new(FaceId::Bottom));
        assert_eq!(shell.edit().map(|e| e.target()), Some(FaceId::Bottom));
        assert_eq!(shell.edit().map(|e| e.buffer()), Some(""));
        shell.on_submit();
        assert_eq!(shell.face(FaceId::Right).label, "");
        assert!(
            shell
                .events()
                .contains(&ShellEvent::EditAbandoned { face: FaceId::Right })
        );
    }

    #[test]
    fn overlay_requires_anchor() {
        let mut shell = Shell::new(CubeVariant::Label);
        shell.on_face_clicked(FaceClick::new(FaceId::Top));
        assert!(shell.is_editing());
        assert!(shell.editor_overlay().is_none());

        let anchor = Vec2::new(100.0, 200.0);
        shell.on_face_clicked(FaceClick::with_anchor(FaceId::Top, anchor));
        shell.on_text_changed("x");
        let overlay = shell.editor_overlay().unwrap();
        assert_eq!(overlay.face, FaceId::Top);
        assert_eq!(overlay.text, "x");
        assert_eq!(overlay.anchor, anchor);
    }

    #[test]
    fn submit_while_idle_is_noop() {
        let mut shell = Shell::new(CubeVariant::Label);
        let before = slot_ids(&shell);
        assert_eq!(shell.on_submit(), None);
        assert_eq!(slot_ids(&shell), before);
        assert!(shell.events().is_empty());
    }

    #[test]
    fn index_click_validates_range() {
        let mut shell = Shell::new(CubeVariant::Label);
        assert!(shell.on_face_index_clicked(6, None).is_err());
        assert!(!shell.is_editing());
        shell.on_face_index_clicked(2, None).unwrap();
        assert_eq!(shell.edit().map(|e| e.target()), Some(FaceId::Top));
    }

    #[test]
    fn event_log_records_lifecycle() {
        let mut shell = Shell::new(CubeVariant::Label);
        shell.on_face_clicked(FaceClick::new(FaceId::Top));
        shell.on_text_changed("Hi");
        shell.on_submit();
        let events = shell.drain_events();
        assert_eq!(
            events,
            vec![
                ShellEvent::EditStarted {
                    face: FaceId::Top,
                    anchor: None
                },
                ShellEvent::BufferChanged {
                    face: FaceId::Top,
                    text: "Hi".into()
                },
                ShellEvent::Committed {
                    face: FaceId::Top,
                    label: "Hi".into()
                },
            ]
        );
        assert!(shell.events().is_empty());
    }

    #[test]
    fn on_key_only_commits_on_enter() {
        let mut shell = Shell::new(CubeVariant::Label);
        shell.on_face_clicked(FaceClick::new(FaceId::Left));
        shell.on_key(&KeyInput::new(Key::Other, "ab"));
        assert_eq!(shell.face(FaceId::Left).label, "");
        assert_eq!(shell.edit().map(|e| e.buffer()), Some("ab"));
        shell.on_key(&KeyInput::enter("ab"));
        assert_eq!(shell.face(FaceId::Left).label, "ab");
        assert!(!shell.is_editing());
    }
}
