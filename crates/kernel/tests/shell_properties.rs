use facecube_common::{FaceClick, FaceId};
use facecube_input::{Action, Key, KeyInput};
use facecube_kernel::{CubeVariant, Shell};
use proptest::prelude::*;

fn face_strategy() -> impl Strategy<Value = FaceId> {
    (0usize..6).prop_map(|i| FaceId::ALL[i])
}

#[derive(Debug, Clone)]
enum Step {
    Click(FaceId),
    Type(String),
    Enter,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        face_strategy().prop_map(Step::Click),
        "[a-zA-Z0-9 <>&]{0,8}".prop_map(Step::Type),
        Just(Step::Enter),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn commit_changes_exactly_one_label(face in face_strategy(), text in "[ -~]{0,12}") {
        let mut shell = Shell::new(CubeVariant::Label);
        let before: Vec<_> = FaceId::ALL.iter().map(|f| shell.surfaces().get(*f).id()).collect();

        shell.apply(Action::ClickFace(FaceClick::new(face)));
        shell.apply(KeyInput::new(Key::Other, text.clone()).to_action());
        shell.apply(KeyInput::enter(text.clone()).to_action());

        prop_assert!(!shell.is_editing());
        for other in FaceId::ALL {
            if other == face {
                prop_assert_eq!(&shell.face(other).label, &text);
            } else {
                prop_assert_eq!(shell.face(other).label.as_str(), "");
                prop_assert_eq!(shell.surfaces().get(other).id(), before[other.index()]);
            }
        }
    }

    #[test]
    fn labels_only_change_on_enter(steps in prop::collection::vec(step_strategy(), 0..12)) {
        let mut shell = Shell::new(CubeVariant::Label);
        let mut expected: [String; 6] = Default::default();
        let mut target: Option<(FaceId, String)> = None;

        for step in steps {
            match step {
                Step::Click(face) => {
                    let seed = expected[face.index()].clone();
                    target = Some((face, seed));
                    shell.apply(Action::ClickFace(FaceClick::new(face)));
                }
                Step::Type(text) => {
                    if let Some((_, buffer)) = target.as_mut() {
                        *buffer = text.clone();
                    }
                    shell.apply(KeyInput::new(Key::Other, text).to_action());
                }
                Step::Enter => {
                    if let Some((face, buffer)) = target.take() {
                        expected[face.index()] = buffer;
                    }
                    shell.apply(Action::Submit);
                }
            }
            for face in FaceId::ALL {
                prop_assert_eq!(&shell.face(face).label, &expected[face.index()]);
            }
            prop_assert_eq!(shell.is_editing(), target.is_some());
        }
    }

    #[test]
    fn reveal_state_is_monotonic(clicks in prop::collection::vec(face_strategy(), 0..10)) {
        let mut shell = Shell::new(CubeVariant::Reveal);
        let mut revealed = [false; 6];
        for face in clicks {
            shell.on_face_clicked(FaceClick::new(face));
            revealed[face.index()] = true;
            for f in FaceId::ALL {
                prop_assert_eq!(shell.face(f).revealed, revealed[f.index()]);
            }
        }
    }
}
