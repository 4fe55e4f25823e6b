use anyhow::{Context, bail};
use facecube_common::FaceId;
use glam::Vec2;

/// One step of a scripted session.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `click:<face>`: the cube reports a hit on this face.
    Click(FaceId),
    /// `point:<x>,<y>`: a pointer click at pixels, resolved by picking.
    Point(Vec2),
    /// `key:<text>`: a non-Enter keystroke leaving `text` in the editor.
    Key(String),
    /// `type:<text>`: one keystroke per character, building `text` up.
    Type(String),
    /// `enter`: the Enter key.
    Enter,
}

impl std::str::FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.eq_ignore_ascii_case("enter") {
            return Ok(Step::Enter);
        }
        let Some((verb, arg)) = s.split_once(':') else {
            bail!("unrecognized step {s:?} (expected verb:arg or enter)");
        };
        match verb {
            "click" => {
                let face = arg
                    .parse::<FaceId>()
                    .with_context(|| format!("bad face in step {s:?}"))?;
                Ok(Step::Click(face))
            }
            "point" => {
                let (x, y) = arg
                    .split_once(',')
                    .with_context(|| format!("point needs x,y in step {s:?}"))?;
                let x: f32 = x.trim().parse().with_context(|| format!("bad x in {s:?}"))?;
                let y: f32 = y.trim().parse().with_context(|| format!("bad y in {s:?}"))?;
                Ok(Step::Point(Vec2::new(x, y)))
            }
            "key" => Ok(Step::Key(arg.to_owned())),
            "type" => Ok(Step::Type(arg.to_owned())),
            other => bail!("unknown step verb {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_verb() {
        assert_eq!("click:2".parse::<Step>().unwrap(), Step::Click(FaceId::Top));
        assert_eq!("click:front".parse::<Step>().unwrap(), Step::Click(FaceId::Front));
        assert_eq!(
            "point:640, 400".parse::<Step>().unwrap(),
            Step::Point(Vec2::new(640.0, 400.0))
        );
        assert_eq!("type:Hi".parse::<Step>().unwrap(), Step::Type("Hi".into()));
        assert_eq!("key:".parse::<Step>().unwrap(), Step::Key(String::new()));
        assert_eq!("ENTER".parse::<Step>().unwrap(), Step::Enter);
    }

    #[test]
    fn text_may_contain_colons() {
        assert_eq!("type:a:b".parse::<Step>().unwrap(), Step::Type("a:b".into()));
    }

    #[test]
    fn rejects_garbage() {
        assert!("jump".parse::<Step>().is_err());
        assert!("click:7".parse::<Step>().is_err());
        assert!("point:1".parse::<Step>().is_err());
        assert!("fly:1".parse::<Step>().is_err());
    }
}
