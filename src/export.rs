//! Export: capture the mounted canvas surface and save it as PNG.

use crate::canvas::CompositionCanvas;
use crate::error::Result;
use crate::image::ImgBackend;

use libvips::VipsImage;
use std::path::{Path, PathBuf};

/// Default export filename.
pub const DEFAULT_FILENAME: &str = "meme.png";

/// Where captured surfaces get written. `ImgBackend` is the real sink;
/// tests substitute their own.
pub trait OutputSink {
    fn write(&self, img: &VipsImage, path: &Path) -> Result<()>;
}

impl OutputSink for ImgBackend {
    fn write(&self, img: &VipsImage, path: &Path) -> Result<()> {
        ImgBackend::write(self, img, path.to_string_lossy())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The capture was written to this path.
    Saved(PathBuf),
    /// No surface has been rendered yet; nothing happened. The caller
    /// may retry after the first render.
    NotMounted,
    /// An export is already in flight; this one was not started.
    Busy,
}

/// Captures the canvas surface pixel-for-pixel. The export never
/// re-renders from the session, so the file always matches what the
/// canvas showed, sub-pixel text artifacts included.
pub struct Exporter {
    path: PathBuf,
    busy: bool,
}

impl Exporter {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_FILENAME)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// One-shot export of the mounted surface. The busy latch is
    /// released on every path out, including write failure, so a failed
    /// export can always be retried.
    pub fn export(
        &mut self,
        canvas: &CompositionCanvas,
        sink: &impl OutputSink,
    ) -> Result<ExportOutcome> {
        if self.busy {
            return Ok(ExportOutcome::Busy);
        }
        let Some(mounted) = canvas.mounted() else {
            return Ok(ExportOutcome::NotMounted);
        };
        self.busy = true;
        let res = sink.write(&mounted.image, &self.path);
        self.busy = false;
        res.map(|()| ExportOutcome::Saved(self.path.clone()))
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}
