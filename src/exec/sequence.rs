use std::path::{Path, PathBuf};

use crate::animation::metadata::AnimationMetadata;
use crate::encode::sink::SequenceSink;
use crate::exec::frame::{RenderedFrame, StillOutput};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MdlError, MdlResult};

/// Container extension for sequence frames.
pub const FRAME_EXTENSION: &str = "png";

/// `<frames_dir>/<base_name><index:03>.png`
pub fn frame_path(frames_dir: &Path, metadata: &AnimationMetadata, frame: FrameIndex) -> PathBuf {
    frames_dir.join(format!("{}.{FRAME_EXTENSION}", metadata.frame_stem(frame)))
}

/// What the finalizer produced over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceOutcome {
    /// Images written, in order.
    pub saved: Vec<PathBuf>,
    /// `saved.len()` as a counter.
    pub images_saved: u64,
    /// Display requests forwarded to the sink.
    pub displays: u64,
    /// Assembled animation (animation mode only).
    pub animation: Option<PathBuf>,
}

/// Persists frames as they complete and triggers animation assembly once at the end.
///
/// Frames must arrive in increasing index order with no gaps; the output naming depends on it.
#[derive(Debug)]
pub struct SequenceFinalizer<'a> {
    metadata: &'a AnimationMetadata,
    frames_dir: PathBuf,
    next: u64,
    outcome: SequenceOutcome,
}

impl<'a> SequenceFinalizer<'a> {
    /// A finalizer expecting frame 0 first.
    pub fn new(metadata: &'a AnimationMetadata, frames_dir: impl Into<PathBuf>) -> Self {
        Self {
            metadata,
            frames_dir: frames_dir.into(),
            next: 0,
            outcome: SequenceOutcome::default(),
        }
    }

    /// Index of the next frame expected by [`accept`](Self::accept).
    pub fn next_frame(&self) -> FrameIndex {
        FrameIndex(self.next)
    }

    /// Persist one finished frame.
    ///
    /// In animation mode the frame goes to its sequence path. In still mode the script's own
    /// `save`/`display` requests are replayed against the sink in order.
    pub fn accept(&mut self, frame: RenderedFrame, sink: &mut dyn SequenceSink) -> MdlResult<()> {
        if frame.index.0 != self.next {
            return Err(MdlError::validation(format!(
                "frames must be finalized in order: expected {}, got {}",
                self.next, frame.index.0
            )));
        }
        if frame.index.0 >= self.metadata.num_frames {
            return Err(MdlError::validation(format!(
                "frame {} is outside the declared {} frames",
                frame.index.0, self.metadata.num_frames
            )));
        }

        if self.metadata.is_animation() {
            let path = frame_path(&self.frames_dir, self.metadata, frame.index);
            let written = sink.save_frame(&frame.target, &path)?;
            tracing::debug!(frame = frame.index.0, path = %written.display(), "frame saved");
            self.record_save(written);
        } else {
            for output in frame.still_outputs {
                match output {
                    StillOutput::Save { path, target } => {
                        let written = sink.save_frame(&target, &path)?;
                        tracing::info!(path = %written.display(), "image saved");
                        self.record_save(written);
                    }
                    StillOutput::Display { target } => {
                        sink.display(&target)?;
                        self.outcome.displays += 1;
                    }
                }
            }
        }

        self.next += 1;
        Ok(())
    }

    fn record_save(&mut self, path: PathBuf) {
        self.outcome.saved.push(path);
        self.outcome.images_saved += 1;
    }

    /// Close the sequence, assembling the animation when more than one frame exists.
    pub fn finish(mut self, sink: &mut dyn SequenceSink) -> MdlResult<SequenceOutcome> {
        if self.next != self.metadata.num_frames {
            return Err(MdlError::validation(format!(
                "sequence incomplete: {} of {} frames finalized",
                self.next, self.metadata.num_frames
            )));
        }
        if self.metadata.is_animation() {
            let out = sink.assemble_animation(&self.metadata.base_name, &self.outcome.saved)?;
            tracing::info!(path = %out.display(), frames = self.next, "animation assembled");
            self.outcome.animation = Some(out);
        }
        Ok(self.outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/sequence.rs"]
mod tests;
