use facecube_common::FaceId;
use facecube_kernel::{CubeVariant, Shell};
use serde::Serialize;

/// Shell inspector for developer tooling.
///
/// Provides read-only queries against shell state for debugging and the
/// desktop side panel.
pub struct ShellInspector;

impl ShellInspector {
    /// Produce a summary of the shell state.
    pub fn summary(shell: &Shell) -> ShellSummary {
        ShellSummary {
            variant: shell.variant(),
            faces: FaceId::ALL
                .iter()
                .map(|&face| Self::inspect_face(shell, face))
                .collect(),
            edit_target: shell.edit().map(|e| e.target()),
            edit_buffer: shell.edit().map(|e| e.buffer().to_owned()),
            pending_events: shell.events().len(),
        }
    }

    pub fn inspect_face(shell: &Shell, face: FaceId) -> FaceInfo {
        let state = shell.face(face);
        let surface = shell.surfaces().get(face);
        FaceInfo {
            index: face.index(),
            side: face.side_name(),
            color_name: face.spec().name,
            label: state.label.clone(),
            revealed: state.revealed,
            surface_id: surface.id().0,
            surface_size: [surface.width(), surface.height()],
        }
    }

    pub fn to_json(shell: &Shell) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::summary(shell))
    }
}

/// Summary of shell state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct ShellSummary {
    pub variant: CubeVariant,
    pub faces: Vec<FaceInfo>,
    pub edit_target: Option<FaceId>,
    pub edit_buffer: Option<String>,
    pub pending_events: usize,
}

impl std::fmt::Display for ShellSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edit = match (&self.edit_target, &self.edit_buffer) {
            (Some(face), Some(buffer)) => format!("editing {face} buffer={buffer:?}"),
            _ => "idle".to_string(),
        };
        writeln!(
            f,
            "Shell: variant={:?} {} pending_events={}",
            self.variant, edit, self.pending_events
        )?;
        for face in &self.faces {
            writeln!(f, "  {face}")?;
        }
        Ok(())
    }
}

/// Detailed info about a single face.
#[derive(Debug, Clone, Serialize)]
pub struct FaceInfo {
    pub index: usize,
    pub side: &'static str,
    pub color_name: &'static str,
    pub label: String,
    pub revealed: bool,
    pub surface_id: u64,
    pub surface_size: [u32; 2],
}

impl std::fmt::Display for FaceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {:<6} {:<7} label={:?} revealed={} surface#{} {}x{}",
            self.index,
            self.side,
            self.color_name,
            self.label,
            self.revealed,
            self.surface_id,
            self.surface_size[0],
            self.surface_size[1],
        )
    }
}
