use std::path::PathBuf;

use crate::foundation::core::DVec3;
use crate::foundation::math::Axis;

/// One operation of a parsed scene script.
///
/// Commands are immutable once parsed and are replayed in order for every frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Declare the number of frames in the animation (last directive wins).
    Frames {
        /// Declared frame count.
        count: i64,
    },
    /// Declare the base name of persisted frame files (last directive wins).
    Basename {
        /// Base name used for frame files and the assembled animation.
        name: String,
    },
    /// Linearly vary a knob between two frames.
    Vary {
        /// Knob being varied.
        knob: String,
        /// First governed frame (inclusive).
        start_frame: i64,
        /// Last governed frame (inclusive).
        end_frame: i64,
        /// Knob value at `start_frame`.
        start_value: f64,
        /// Knob value at `end_frame`.
        end_value: f64,
    },
    /// Axis-aligned box; `corner` is the front-top-left vertex.
    Box {
        /// Optional material name.
        constants: Option<String>,
        /// Front-top-left corner.
        corner: DVec3,
        /// `(width, height, depth)`, extending towards +x, -y and -z.
        size: DVec3,
    },
    /// Sphere.
    Sphere {
        /// Optional material name.
        constants: Option<String>,
        /// Centre.
        center: DVec3,
        /// Radius.
        radius: f64,
    },
    /// Torus whose ring lies in the xz plane.
    Torus {
        /// Optional material name.
        constants: Option<String>,
        /// Centre.
        center: DVec3,
        /// Radius of the tube cross-section.
        tube_radius: f64,
        /// Distance from the centre to the middle of the tube.
        major_radius: f64,
    },
    /// Line segment, drawn unlit.
    Line {
        /// Segment start.
        from: DVec3,
        /// Segment end.
        to: DVec3,
    },
    /// Translate the current coordinate system.
    Move {
        /// Offset, pre-scaled by the knob value when one is named.
        offset: DVec3,
        /// Optional modulating knob.
        knob: Option<String>,
    },
    /// Scale the current coordinate system.
    Scale {
        /// Scale factors, pre-scaled by the knob value when one is named.
        factors: DVec3,
        /// Optional modulating knob.
        knob: Option<String>,
    },
    /// Rotate the current coordinate system.
    Rotate {
        /// Rotation axis (defaults to z).
        axis: Axis,
        /// Angle in degrees, pre-scaled by the knob value when one is named.
        degrees: f64,
        /// Optional modulating knob.
        knob: Option<String>,
    },
    /// Duplicate the current coordinate system.
    Push,
    /// Restore the previous coordinate system.
    Pop,
    /// Show the image so far (still-image mode only).
    Display,
    /// Save the image so far (still-image mode only).
    Save {
        /// Output path.
        path: PathBuf,
    },
}

impl Command {
    /// Knob modulating this command, if any.
    pub fn knob(&self) -> Option<&str> {
        match self {
            Self::Move { knob, .. } | Self::Scale { knob, .. } | Self::Rotate { knob, .. } => {
                knob.as_deref()
            }
            _ => None,
        }
    }

    /// Material referenced by this command, if any.
    pub fn constants(&self) -> Option<&str> {
        match self {
            Self::Box { constants, .. }
            | Self::Sphere { constants, .. }
            | Self::Torus { constants, .. } => constants.as_deref(),
            _ => None,
        }
    }

    /// Script keyword for this command.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::Frames { .. } => "frames",
            Self::Basename { .. } => "basename",
            Self::Vary { .. } => "vary",
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Torus { .. } => "torus",
            Self::Line { .. } => "line",
            Self::Move { .. } => "move",
            Self::Scale { .. } => "scale",
            Self::Rotate { .. } => "rotate",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Display => "display",
            Self::Save { .. } => "save",
        }
    }
}
