mod script;

use clap::{Parser, Subcommand, ValueEnum};
use facecube_common::{DEFAULT_VIEWPORT, FaceClick, FaceId, Viewport};
use facecube_input::{Action, Key, KeyInput};
use facecube_kernel::{CubeVariant, Shell};
use facecube_render::{ClickReport, DebugTextRenderer, InteractiveCube, OrbitCamera, Renderer};
use facecube_texture::{TextureMode, TextureSynthesizer};
use facecube_tools::ShellInspector;
use script::Step;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "facecube-cli", about = "CLI tool for facecube operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Click reveals the face's color name
    Reveal,
    /// Click opens an inline label editor
    Label,
}

impl From<VariantArg> for CubeVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Reveal => CubeVariant::Reveal,
            VariantArg::Label => CubeVariant::Label,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SurfaceArg {
    /// 256x256 face color, white text
    Reveal,
    /// 256x256 face color, no text
    Hidden,
    /// 256x512 white, black text
    Label,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Rasterize one face surface to a PNG
    Synthesize {
        /// Label text; defaults to the face's color name
        #[arg(short, long)]
        text: Option<String>,
        /// Face index (0-5) or side name; picks the background color
        #[arg(short, long, default_value = "front")]
        face: FaceId,
        #[arg(short, long, value_enum, default_value = "reveal")]
        mode: SurfaceArg,
        /// Output PNG path
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Replay a scripted session: click:<face>, point:<x>,<y>, key:<text>, type:<text>, enter
    Session {
        #[arg(short, long, value_enum, default_value = "label")]
        mode: VariantArg,
        /// Print the final inspector summary as JSON
        #[arg(long)]
        json: bool,
        /// Steps, applied in order
        steps: Vec<Step>,
    },
    /// Print each face's projected anchor for the default camera
    Project {
        #[arg(long, default_value_t = DEFAULT_VIEWPORT.width)]
        width: f32,
        #[arg(long, default_value_t = DEFAULT_VIEWPORT.height)]
        height: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("facecube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("faces:");
            for face in FaceId::ALL {
                let spec = face.spec();
                println!("  {face} {} {}", spec.name, spec.color);
            }
        }
        Commands::Synthesize {
            text,
            face,
            mode,
            out,
        } => {
            let spec = face.spec();
            let text = text.unwrap_or_else(|| spec.name.to_owned());
            let mode = match mode {
                SurfaceArg::Reveal => TextureMode::Reveal { show_text: true },
                SurfaceArg::Hidden => TextureMode::Reveal { show_text: false },
                SurfaceArg::Label => TextureMode::Label,
            };
            let surface = TextureSynthesizer::new().try_synthesize(&text, spec.color, mode)?;
            surface.write_png(&out)?;
            println!(
                "wrote {}x{} surface for {face} to {}",
                surface.width(),
                surface.height(),
                out.display()
            );
        }
        Commands::Session {
            mode,
            json,
            steps,
        } => run_session(mode.into(), &steps, json)?,
        Commands::Project { width, height } => {
            let viewport = Viewport::new(width, height);
            let mut camera = OrbitCamera::default();
            camera.set_viewport(viewport);
            let cube = InteractiveCube::new(ClickReport::FaceAndAnchor);
            let eye = camera.position();
            println!("Viewport {width}x{height}, camera eye=({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z);
            for face in FaceId::ALL {
                let anchor = cube.anchor_for(face, &camera, viewport);
                let center = cube.geometry().reference_point(face);
                let facing = face.normal().dot(eye - center) > 0.0;
                println!(
                    "  {:<10} anchor=({:.1}, {:.1}) in_viewport={} facing_camera={}",
                    face.to_string(),
                    anchor.x,
                    anchor.y,
                    viewport.contains(anchor),
                    facing
                );
            }
        }
    }

    Ok(())
}

fn run_session(variant: CubeVariant, steps: &[Step], json: bool) -> anyhow::Result<()> {
    let viewport = DEFAULT_VIEWPORT;
    let mut camera = OrbitCamera::default();
    camera.set_viewport(viewport);
    let report = match variant {
        CubeVariant::Reveal => ClickReport::FaceOnly,
        CubeVariant::Label => ClickReport::FaceAndAnchor,
    };
    let mut cube = InteractiveCube::new(report);
    let mut shell = Shell::new(variant);
    let mut renderer = DebugTextRenderer::new();
    cube.render(shell.surfaces());

    for step in steps {
        let actions = match step {
            Step::Click(face) => {
                let anchor = (report == ClickReport::FaceAndAnchor)
                    .then(|| cube.anchor_for(*face, &camera, viewport));
                vec![Action::ClickFace(FaceClick {
                    face: *face,
                    anchor,
                })]
            }
            Step::Point(pos) => match cube.on_pointer_click(*pos, &camera, viewport) {
                Some(click) => vec![Action::ClickFace(click)],
                None => {
                    println!("point ({:.0}, {:.0}) missed the cube", pos.x, pos.y);
                    vec![]
                }
            },
            Step::Key(text) => vec![KeyInput::new(Key::Other, text.clone()).to_action()],
            Step::Type(text) => typed_prefixes(shell.edit().map(|e| e.buffer()), text)
                .into_iter()
                .map(|t| KeyInput::new(Key::Other, t).to_action())
                .collect(),
            Step::Enter => {
                let current = shell.edit().map(|e| e.buffer().to_owned()).unwrap_or_default();
                vec![KeyInput::enter(current).to_action()]
            }
        };
        for action in actions {
            tracing::debug!(?action, "applying");
            shell.apply(action);
        }
        let changed = cube.render(shell.surfaces());
        if !changed.is_empty() {
            tracing::info!(?changed, "faces redrawn after {step:?}");
        }
    }

    print!("{}", renderer.render(&cube, &camera));
    if json {
        println!("{}", ShellInspector::to_json(&shell)?);
    } else {
        print!("{}", ShellInspector::summary(&shell));
    }
    Ok(())
}

/// Editor contents after each keystroke of typing `text` onto `current`.
fn typed_prefixes(current: Option<&str>, text: &str) -> Vec<String> {
    let mut buffer = current.unwrap_or_default().to_owned();
    text.chars()
        .map(|c| {
            buffer.push(c);
            buffer.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_appends_per_keystroke() {
        assert_eq!(typed_prefixes(None, "Hi"), vec!["H", "Hi"]);
        assert_eq!(typed_prefixes(Some("ab"), "c"), vec!["abc"]);
        assert!(typed_prefixes(Some("x"), "").is_empty());
    }

    #[test]
    fn cli_parses_session_steps() {
        let cli = Cli::try_parse_from([
            "facecube-cli",
            "session",
            "--mode",
            "label",
            "click:2",
            "type:Hi",
            "enter",
        ])
        .unwrap();
        match cli.command {
            Commands::Session { steps, .. } => assert_eq!(steps.len(), 3),
            _ => panic!("expected session"),
        }
    }

    #[test]
    fn session_runs_end_to_end() {
        let steps: Vec<Step> = ["click:2", "type:Hi", "enter", "point:5,5"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        run_session(CubeVariant::Label, &steps, true).unwrap();
    }
}
