use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MdlError, MdlResult};
use crate::script::command::Command;

/// Base name used when a script sets no `basename`.
pub const DEFAULT_BASENAME: &str = "snap";

/// Largest accepted frame count. Knob tracks hold one slot per frame.
pub const MAX_FRAMES: u64 = 1_000_000;

/// Run-wide animation parameters, resolved once before rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationMetadata {
    /// Stem for persisted frame files and the assembled animation.
    pub base_name: String,
    /// Total number of frames (`>= 1`).
    pub num_frames: u64,
}

impl Default for AnimationMetadata {
    fn default() -> Self {
        Self {
            base_name: DEFAULT_BASENAME.to_owned(),
            num_frames: 1,
        }
    }
}

impl AnimationMetadata {
    /// `true` when more than one frame is rendered; `save`/`display` are skipped in this mode.
    pub fn is_animation(&self) -> bool {
        self.num_frames > 1
    }

    /// File stem for `frame`: base name followed by the index zero-padded to 3 digits.
    pub fn frame_stem(&self, frame: FrameIndex) -> String {
        format!("{}{:03}", self.base_name, frame.0)
    }
}

/// Scan the command stream for `frames`, `basename` and `vary`.
///
/// Repeated `frames`/`basename` directives overwrite each other; the last one wins.
pub fn resolve_metadata(commands: &[Command]) -> MdlResult<AnimationMetadata> {
    let mut meta = AnimationMetadata::default();
    let mut saw_vary = false;
    let mut saw_basename = false;
    let mut saw_frames = false;
    let mut declared_frames = 1i64;

    for command in commands {
        match command {
            Command::Vary { .. } => saw_vary = true,
            Command::Basename { name } => {
                saw_basename = true;
                meta.base_name = name.clone();
            }
            Command::Frames { count } => {
                saw_frames = true;
                declared_frames = *count;
            }
            _ => {}
        }
    }

    if saw_vary && !saw_frames {
        return Err(MdlError::syntax(
            "dangling knob variation: `vary` is present but `frames` is not",
        ));
    }
    if declared_frames < 1 {
        return Err(MdlError::syntax(format!(
            "frame count must be at least 1, got {declared_frames}"
        )));
    }
    if declared_frames as u64 > MAX_FRAMES {
        return Err(MdlError::syntax(format!(
            "frame count {declared_frames} exceeds the supported maximum of {MAX_FRAMES}"
        )));
    }
    meta.num_frames = declared_frames as u64;

    if saw_frames && !saw_basename {
        tracing::warn!(
            base_name = DEFAULT_BASENAME,
            "`frames` is set but `basename` is not; using default base name '{DEFAULT_BASENAME}'"
        );
    }

    Ok(meta)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/metadata.rs"]
mod tests;
