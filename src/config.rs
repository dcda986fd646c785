use std::path::{Path, PathBuf};

use anyhow::Context as _;
use glam::DVec3;

use crate::exec::pipeline::RenderThreading;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{MdlError, MdlResult};
use crate::render::lighting::{Light, SceneLighting};

/// Run-wide rendering configuration.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Colour every frame is cleared to.
    pub background: Rgb8,
    /// Colour of `line` segments.
    pub line_color: Rgb8,
    /// Direction towards the viewer, used for culling and specular highlights.
    pub view: DVec3,
    /// Ambient light colour.
    pub ambient: Rgb8,
    /// Scene lights.
    pub lights: Vec<Light>,
    /// Phong exponent for specular highlights.
    pub specular_exponent: i32,
    /// Tessellation resolution for spheres and tori.
    pub step_3d: u32,
    /// Directory animation frames are written to.
    pub frames_dir: PathBuf,
    /// Directory the assembled animation is written to.
    pub animation_dir: PathBuf,
    /// Delay between animation frames, in milliseconds.
    pub frame_delay_ms: u32,
    /// Frame-level parallelism.
    pub threading: RenderThreading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            background: Rgb8::BLACK,
            line_color: Rgb8::WHITE,
            view: DVec3::Z,
            ambient: Rgb8::new(50, 50, 50),
            lights: vec![Light {
                direction: DVec3::new(0.5, 0.75, 1.0),
                color: Rgb8::WHITE,
            }],
            specular_exponent: 4,
            step_3d: 100,
            frames_dir: PathBuf::from("anim"),
            animation_dir: PathBuf::from("."),
            frame_delay_ms: 17,
            threading: RenderThreading::default(),
        }
    }
}

impl RenderConfig {
    /// Load a JSON config file; missing keys keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> MdlResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| MdlError::validation(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check static invariants.
    pub fn validate(&self) -> MdlResult<()> {
        Canvas::new(self.width, self.height)?;
        if self.step_3d < 3 {
            return Err(MdlError::validation(format!(
                "step_3d must be >= 3, got {}",
                self.step_3d
            )));
        }
        if self.view.length_squared() == 0.0 || !self.view.is_finite() {
            return Err(MdlError::validation("view direction must be a finite non-zero vector"));
        }
        if self.specular_exponent < 0 {
            return Err(MdlError::validation("specular_exponent must be >= 0"));
        }
        self.threading.validate()
    }

    /// Output dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// View and light setup handed to the rasterizer.
    pub fn lighting(&self) -> SceneLighting {
        SceneLighting {
            view: self.view,
            ambient: self.ambient,
            lights: self.lights.clone(),
            specular_exponent: self.specular_exponent,
        }
    }
}
