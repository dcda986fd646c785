use std::path::PathBuf;

use crate::config::RenderConfig;
use crate::exec::pipeline::Analysis;
use crate::exec::stack::TransformStack;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{MdlError, MdlResult};
use crate::foundation::math;
use crate::geometry::mesh::{EdgeList, TriangleMesh, add_box, add_edge, add_sphere, add_torus};
use crate::render::lighting::SceneLighting;
use crate::render::raster::{draw_lines, draw_polygons};
use crate::render::target::DrawTarget;
use crate::script::Script;
use crate::script::command::Command;

/// Output requested by a `save` or `display` command in still-image mode, with a snapshot of the
/// target as it was at that point of the replay.
#[derive(Clone, Debug, PartialEq)]
pub enum StillOutput {
    /// Persist the snapshot to `path`.
    Save {
        /// Path given in the script.
        path: PathBuf,
        /// Image at the time of the command.
        target: DrawTarget,
    },
    /// Show the snapshot interactively.
    Display {
        /// Image at the time of the command.
        target: DrawTarget,
    },
}

/// One completed frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFrame {
    /// Frame index.
    pub index: FrameIndex,
    /// Final image.
    pub target: DrawTarget,
    /// `save`/`display` requests in script order (always empty in animation mode).
    pub still_outputs: Vec<StillOutput>,
}

/// Mutable state owned by a single frame's replay.
struct FrameState<'a> {
    stack: TransformStack,
    target: DrawTarget,
    polygons: TriangleMesh,
    edges: EdgeList,
    material: Option<&'a str>,
}

impl<'a> FrameState<'a> {
    fn new(config: &RenderConfig) -> Self {
        Self {
            stack: TransformStack::new(),
            target: DrawTarget::new(config.canvas(), config.background),
            polygons: TriangleMesh::new(),
            edges: EdgeList::new(),
            material: None,
        }
    }

    /// Place pending triangles with the current transform, draw them, then reset the
    /// accumulator and the active material.
    fn flush_polygons(&mut self, script: &Script, lighting: &SceneLighting) -> MdlResult<()> {
        self.polygons.transform(self.stack.current());
        let drawn = draw_polygons(
            &self.polygons,
            &mut self.target,
            lighting,
            &script.symbols,
            self.material,
        );
        self.polygons.clear();
        self.material = None;
        drawn
    }

    fn flush_edges(&mut self, config: &RenderConfig) {
        self.edges.transform(self.stack.current());
        draw_lines(&self.edges, &mut self.target, config.line_color);
        self.edges.clear();
    }
}

/// Replay the whole command stream for `frame` and return the finished image.
///
/// Reads only shared, immutable inputs, so frames may run concurrently.
#[tracing::instrument(level = "debug", skip_all, fields(frame = frame.0))]
pub fn execute_frame(
    script: &Script,
    analysis: &Analysis,
    config: &RenderConfig,
    frame: FrameIndex,
) -> MdlResult<RenderedFrame> {
    let still = !analysis.metadata.is_animation();
    let lighting = config.lighting();
    let step = config.step_3d;
    let mut state = FrameState::new(config);
    let mut still_outputs = Vec::new();

    for (idx, command) in script.commands.iter().enumerate() {
        if let Some(knob) = command.knob()
            && !analysis.knobs.is_declared(knob)
        {
            tracing::debug!(knob, command = idx, "undeclared knob; using neutral value");
        }
        let k = analysis.knobs.resolve(command.knob(), frame);

        match command {
            Command::Frames { .. } | Command::Basename { .. } | Command::Vary { .. } => {}
            Command::Box {
                constants,
                corner,
                size,
            } => {
                state.material = constants.as_deref();
                add_box(&mut state.polygons, *corner, *size);
                state.flush_polygons(script, &lighting)?;
            }
            Command::Sphere {
                constants,
                center,
                radius,
            } => {
                state.material = constants.as_deref();
                add_sphere(&mut state.polygons, *center, *radius, step);
                state.flush_polygons(script, &lighting)?;
            }
            Command::Torus {
                constants,
                center,
                tube_radius,
                major_radius,
            } => {
                state.material = constants.as_deref();
                add_torus(
                    &mut state.polygons,
                    *center,
                    *tube_radius,
                    *major_radius,
                    step,
                );
                state.flush_polygons(script, &lighting)?;
            }
            Command::Line { from, to } => {
                add_edge(&mut state.edges, *from, *to);
                state.flush_edges(config);
            }
            Command::Move { offset, .. } => {
                state.stack.apply(&math::translation(*offset * k));
            }
            Command::Scale { factors, .. } => {
                state.stack.apply(&math::scale(*factors * k));
            }
            Command::Rotate { axis, degrees, .. } => {
                // The knob scales the authored angle in degrees; conversion comes last.
                let radians = (degrees * k).to_radians();
                state.stack.apply(&math::rotation(*axis, radians));
            }
            Command::Push => state.stack.push(),
            Command::Pop => {
                state
                    .stack
                    .pop()
                    .map_err(|_| MdlError::StackUnderflow {
                        frame: frame.0,
                        command: idx,
                    })?;
            }
            Command::Display => {
                if still {
                    still_outputs.push(StillOutput::Display {
                        target: state.target.clone(),
                    });
                }
            }
            Command::Save { path } => {
                if still {
                    still_outputs.push(StillOutput::Save {
                        path: path.clone(),
                        target: state.target.clone(),
                    });
                }
            }
        }
    }

    Ok(RenderedFrame {
        index: frame,
        target: state.target,
        still_outputs,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/exec/frame.rs"]
mod tests;
