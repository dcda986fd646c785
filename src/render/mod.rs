//! Software rasterizer: draw target, lighting model, triangle and line scan conversion.

pub(crate) mod lighting;
pub(crate) mod raster;
pub(crate) mod target;
