use std::path::PathBuf;

use rayon::prelude::*;

use crate::animation::knobs::KnobTimeline;
use crate::animation::metadata::{AnimationMetadata, resolve_metadata};
use crate::config::RenderConfig;
use crate::encode::sink::SequenceSink;
use crate::exec::frame::{RenderedFrame, execute_frame};
use crate::exec::sequence::SequenceFinalizer;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MdlError, MdlResult};
use crate::script::Script;
use crate::script::command::Command;

/// Frame-level parallelism settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render frames on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Frames rendered per parallel batch before they are handed to the sink.
    pub chunk_size: usize,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 16,
        }
    }
}

impl RenderThreading {
    /// `threads`, when set, must be at least 1.
    pub fn validate(&self) -> MdlResult<()> {
        if self.threads == Some(0) {
            return Err(MdlError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Everything computed once before the first frame: read-only for the rest of the run.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    /// Frame count and output base name.
    pub metadata: AnimationMetadata,
    /// Per-knob value tracks.
    pub knobs: KnobTimeline,
}

/// Counters reported by [`render_script`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames executed.
    pub frames_rendered: u64,
    /// Images handed to the sink for persistence.
    pub images_saved: u64,
    /// Interactive display requests honoured.
    pub displays: u64,
    /// Assembled animation, when one was produced.
    pub animation: Option<PathBuf>,
}

/// Resolve metadata and knob tracks and check the script for errors that would otherwise only
/// surface mid-render. Nothing is rendered if this fails.
pub fn analyze(script: &Script) -> MdlResult<Analysis> {
    let metadata = resolve_metadata(&script.commands)?;
    let knobs = KnobTimeline::build(&script.commands, metadata.num_frames)?;
    check_materials(script)?;
    check_stack_balance(&script.commands)?;
    tracing::debug!(
        base_name = %metadata.base_name,
        frames = metadata.num_frames,
        knobs = knobs.knob_names().count(),
        "script analyzed"
    );
    Ok(Analysis { metadata, knobs })
}

fn check_materials(script: &Script) -> MdlResult<()> {
    for command in &script.commands {
        if let Some(name) = command.constants()
            && script.symbols.material(name).is_none()
        {
            return Err(MdlError::syntax(format!(
                "undefined constants '{name}' referenced by '{}'",
                command.op_name()
            )));
        }
    }
    Ok(())
}

// Stack depth only depends on push/pop order, which is identical in every frame.
fn check_stack_balance(commands: &[Command]) -> MdlResult<()> {
    let mut depth = 1usize;
    for (idx, command) in commands.iter().enumerate() {
        match command {
            Command::Push => depth += 1,
            Command::Pop if depth == 1 => {
                return Err(MdlError::StackUnderflow {
                    frame: 0,
                    command: idx,
                });
            }
            Command::Pop => depth -= 1,
            _ => {}
        }
    }
    Ok(())
}

/// Analyze `script`, render every frame, and hand the results to `sink` in frame order.
pub fn render_script(
    script: &Script,
    config: &RenderConfig,
    sink: &mut dyn SequenceSink,
) -> MdlResult<RenderStats> {
    config.validate()?;
    let analysis = analyze(script)?;
    let total = analysis.metadata.num_frames;
    let mut finalizer = SequenceFinalizer::new(&analysis.metadata, &config.frames_dir);

    tracing::info!(
        frames = total,
        base_name = %analysis.metadata.base_name,
        parallel = config.threading.parallel,
        "rendering"
    );

    if config.threading.parallel && total > 1 {
        let pool = build_thread_pool(config.threading.threads)?;
        let chunk_size = normalized_chunk_size(config.threading.chunk_size);
        let mut chunk_start = 0u64;
        while chunk_start < total {
            let chunk_end = (chunk_start + chunk_size).min(total);
            let rendered = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| execute_frame(script, &analysis, config, FrameIndex(f)))
                    .collect::<Vec<MdlResult<RenderedFrame>>>()
            });
            for frame in rendered {
                finalizer.accept(frame?, sink)?;
            }
            chunk_start = chunk_end;
        }
    } else {
        for f in 0..total {
            let frame = execute_frame(script, &analysis, config, FrameIndex(f))?;
            finalizer.accept(frame, sink)?;
        }
    }

    let outcome = finalizer.finish(sink)?;
    tracing::info!(
        frames = total,
        saved = outcome.images_saved,
        animation = ?outcome.animation,
        "render complete"
    );
    Ok(RenderStats {
        frames_rendered: total,
        images_saved: outcome.images_saved,
        displays: outcome.displays,
        animation: outcome.animation,
    })
}

fn build_thread_pool(threads: Option<usize>) -> MdlResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(MdlError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MdlError::validation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/pipeline.rs"]
mod tests;
