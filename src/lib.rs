//! mdlrender turns MDL scene scripts into rendered images.
//!
//! A script draws boxes, spheres, tori and lines through a stack of coordinate systems. Transform
//! commands may name a knob whose value varies per frame, which turns one script into an
//! animation:
//!
//! - Parse a [`Script`]
//! - [`analyze`] it into frame count, base name and knob tracks
//! - [`render_script`] every frame into a [`SequenceSink`] such as [`FileSink`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod encode;
pub(crate) mod exec;
pub(crate) mod geometry;
pub(crate) mod render;
pub(crate) mod script;

mod config;

pub use crate::foundation::core::{Canvas, DMat4, DVec3, FrameIndex, Rgb8};
pub use crate::foundation::error::{MdlError, MdlResult};

pub use crate::animation::knobs::{KnobTimeline, NEUTRAL_KNOB_VALUE};
pub use crate::animation::metadata::{
    AnimationMetadata, DEFAULT_BASENAME, MAX_FRAMES, resolve_metadata,
};
pub use crate::config::RenderConfig;
pub use crate::encode::image_file::FileSink;
pub use crate::encode::sink::{InMemorySink, SequenceSink, SinkEvent};
pub use crate::exec::frame::{RenderedFrame, StillOutput, execute_frame};
pub use crate::exec::pipeline::{Analysis, RenderStats, RenderThreading, analyze, render_script};
pub use crate::exec::sequence::{SequenceFinalizer, SequenceOutcome, frame_path};
pub use crate::exec::stack::{StackUnderflow, TransformStack};
pub use crate::geometry::mesh::{
    EdgeList, TriangleMesh, add_box, add_edge, add_sphere, add_torus,
};
pub use crate::render::lighting::{Light, SceneLighting, shade};
pub use crate::render::raster::{draw_lines, draw_polygons};
pub use crate::render::target::DrawTarget;
pub use crate::script::Script;
pub use crate::script::command::Command;
pub use crate::script::symbols::{Material, Reflectance, SymbolTable};

/// Homogeneous transform constructors.
pub mod math {
    pub use crate::foundation::math::{Axis, identity, multiply, rotation, scale, translation};
}
