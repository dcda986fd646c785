use std::path::{Path, PathBuf};

use crate::foundation::error::MdlResult;
use crate::render::target::DrawTarget;

/// Where finished frames go.
///
/// The render loop only talks to this trait; [`FileSink`](crate::FileSink) writes real files and
/// [`InMemorySink`] records the calls.
pub trait SequenceSink {
    /// Persist `target` at `path` and return the path actually written.
    fn save_frame(&mut self, target: &DrawTarget, path: &Path) -> MdlResult<PathBuf>;

    /// Show `target` to the user. Only called in still-image mode.
    fn display(&mut self, target: &DrawTarget) -> MdlResult<()>;

    /// Combine the persisted frames (in order) into one animation named after `base_name`.
    fn assemble_animation(&mut self, base_name: &str, frames: &[PathBuf]) -> MdlResult<PathBuf>;
}

/// A call received by an [`InMemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    /// `save_frame`
    Saved {
        /// Requested path.
        path: PathBuf,
        /// Copy of the saved image.
        target: DrawTarget,
    },
    /// `display`
    Displayed {
        /// Copy of the displayed image.
        target: DrawTarget,
    },
    /// `assemble_animation`
    Assembled {
        /// Base name passed by the finalizer.
        base_name: String,
        /// Frame paths, in order.
        frames: Vec<PathBuf>,
    },
}

/// Sink that keeps everything in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    /// Every call, in order.
    pub events: Vec<SinkEvent>,
}

impl InMemorySink {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths passed to `save_frame`, in order.
    pub fn saved_paths(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Saved { path, .. } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Images passed to `save_frame`, in order.
    pub fn saved_targets(&self) -> Vec<&DrawTarget> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Saved { target, .. } => Some(target),
                _ => None,
            })
            .collect()
    }

    /// Number of `assemble_animation` calls.
    pub fn assembly_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Assembled { .. }))
            .count()
    }
}

impl SequenceSink for InMemorySink {
    fn save_frame(&mut self, target: &DrawTarget, path: &Path) -> MdlResult<PathBuf> {
        self.events.push(SinkEvent::Saved {
            path: path.to_path_buf(),
            target: target.clone(),
        });
        Ok(path.to_path_buf())
    }

    fn display(&mut self, target: &DrawTarget) -> MdlResult<()> {
        self.events.push(SinkEvent::Displayed {
            target: target.clone(),
        });
        Ok(())
    }

    fn assemble_animation(&mut self, base_name: &str, frames: &[PathBuf]) -> MdlResult<PathBuf> {
        self.events.push(SinkEvent::Assembled {
            base_name: base_name.to_owned(),
            frames: frames.to_vec(),
        });
        Ok(PathBuf::from(format!("{base_name}.gif")))
    }
}
