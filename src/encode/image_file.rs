use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat};

use crate::encode::sink::SequenceSink;
use crate::foundation::error::{MdlError, MdlResult};
use crate::render::target::DrawTarget;

/// Viewer launched by [`FileSink::display`].
pub const VIEWER_BINARY: &str = "display";

/// Writes frames to disk with the `image` crate and assembles animated GIFs.
#[derive(Clone, Debug)]
pub struct FileSink {
    animation_dir: PathBuf,
    frame_delay_ms: u32,
}

impl FileSink {
    /// Animations land in `animation_dir`, one frame every `frame_delay_ms`.
    pub fn new(animation_dir: impl Into<PathBuf>, frame_delay_ms: u32) -> Self {
        Self {
            animation_dir: animation_dir.into(),
            frame_delay_ms,
        }
    }

    /// Path the animation for `base_name` is written to.
    pub fn animation_path(&self, base_name: &str) -> PathBuf {
        self.animation_dir.join(format!("{base_name}.gif"))
    }
}

/// `path` when its extension names a format `image` knows, otherwise `path` + `.png`.
pub fn resolve_image_path(path: &Path) -> (PathBuf, ImageFormat) {
    match ImageFormat::from_path(path) {
        Ok(format) => (path.to_path_buf(), format),
        Err(_) => {
            let mut s: OsString = path.as_os_str().to_owned();
            s.push(".png");
            (PathBuf::from(s), ImageFormat::Png)
        }
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> MdlResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// `true` when the external image viewer can be spawned.
pub fn is_viewer_on_path() -> bool {
    std::process::Command::new(VIEWER_BINARY)
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

impl SequenceSink for FileSink {
    fn save_frame(&mut self, target: &DrawTarget, path: &Path) -> MdlResult<PathBuf> {
        let (path, format) = resolve_image_path(path);
        ensure_parent_dir(&path)?;
        target
            .to_rgb_image()
            .save_with_format(&path, format)
            .map_err(|e| MdlError::output(format!("save '{}': {e}", path.display())))?;
        Ok(path)
    }

    fn display(&mut self, target: &DrawTarget) -> MdlResult<()> {
        if !is_viewer_on_path() {
            tracing::warn!(
                viewer = VIEWER_BINARY,
                "image viewer not found on PATH; skipping display"
            );
            return Ok(());
        }

        let tmp = std::env::temp_dir().join(format!("mdlrender-display-{}.png", std::process::id()));
        let _guard = TempFileGuard(Some(tmp.clone()));
        target
            .to_rgb_image()
            .save_with_format(&tmp, ImageFormat::Png)
            .map_err(|e| MdlError::output(format!("write display image: {e}")))?;
        let status = std::process::Command::new(VIEWER_BINARY)
            .arg(&tmp)
            .status()
            .map_err(|e| MdlError::output(format!("launch '{VIEWER_BINARY}': {e}")))?;
        if !status.success() {
            tracing::warn!(%status, "image viewer exited unsuccessfully");
        }
        Ok(())
    }

    fn assemble_animation(&mut self, base_name: &str, frames: &[PathBuf]) -> MdlResult<PathBuf> {
        if frames.is_empty() {
            return Err(MdlError::output("cannot assemble an animation from zero frames"));
        }
        let out = self.animation_path(base_name);
        ensure_parent_dir(&out)?;

        let file = File::create(&out)
            .with_context(|| format!("create animation '{}'", out.display()))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| MdlError::output(format!("gif repeat: {e}")))?;

        let delay = Delay::from_numer_denom_ms(self.frame_delay_ms, 1);
        for path in frames {
            let img = image::open(path)
                .map_err(|e| MdlError::output(format!("read frame '{}': {e}", path.display())))?
                .to_rgba8();
            encoder
                .encode_frame(Frame::from_parts(img, 0, 0, delay))
                .map_err(|e| MdlError::output(format!("encode frame '{}': {e}", path.display())))?;
        }
        tracing::debug!(path = %out.display(), frames = frames.len(), "gif written");
        Ok(out)
    }
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/image_file.rs"]
mod tests;
