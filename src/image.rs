//! Image backend implementation over libvips, with cairo/pango doing
//! the text rasterization.

mod color;

use crate::error::{Error, Result};
pub use crate::image::color::Color;

use cairo::ImageSurface;
use libvips::{ops, VipsApp, VipsImage};
use pango::prelude::FontMapExt;
use std::collections::HashMap;

/// How a source image is scaled into a target region.
#[derive(Debug, Copy, PartialEq, Eq, Clone)]
pub enum FitMode {
    Contain,
    Cover,
    Stretch,
}

impl Default for FitMode {
    fn default() -> Self {
        Self::Cover
    }
}

pub struct ImgBackend {
    vips_app: VipsApp,
    cache: HashMap<String, VipsImage>,
}

impl ImgBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            vips_app: libvips::VipsApp::default("memetica")
                .map_err(|e| Error::VipsError(e.to_string()))?,
            cache: HashMap::new(),
        })
    }

    pub fn err(&self, e: libvips::error::Error) -> Error {
        Error::VipsError(format!(
            "{e}\n{}",
            self.vips_app.error_buffer().expect("vips error buffer")
        ))
    }

    /// Normalizes to 8-bit sRGB with an alpha band, so every image the
    /// compositor touches has the same memory layout.
    fn reinterpret(&self, img: &VipsImage) -> Result<VipsImage> {
        let img = ops::cast(&img, ops::BandFormat::Uchar).map_err(|e| self.err(e))?;
        let img = ops::copy_with_opts(
            &img,
            &ops::CopyOptions {
                interpretation: ops::Interpretation::Srgb,
                width: img.get_width(),
                height: img.get_height(),
                bands: img.get_bands(),
                format: ops::BandFormat::Uchar,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))?;
        if img.get_bands() == 3 {
            ops::bandjoin_const(&img, &mut [255.0]).map_err(|e| self.err(e))
        } else {
            Ok(img)
        }
    }

    pub fn new_canvas(&self, bg: &Color, width: i32, height: i32) -> Result<VipsImage> {
        let (r, g, b, a) = bg.scaled_rgba();
        let img = ops::black_with_opts(width, height, &ops::BlackOptions { bands: 4 })
            .map_err(|e| self.err(e))?;
        let img = VipsImage::new_from_image(&img, &[r, g, b, a]).map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn cairo_to_vips(&self, img: ImageSurface) -> Result<VipsImage> {
        let mut buffer = Vec::new();
        img.write_to_png(&mut buffer)
            .map_err(|_| Error::ImageConversionError("cairo", "vips"))?;
        let mut img = VipsImage::new_from_buffer(&buffer, "").map_err(|e| self.err(e))?;
        img.image_wio_input().map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn open(&self, fp: impl AsRef<str>) -> Result<VipsImage> {
        let fp = fp.as_ref();
        let img = VipsImage::new_from_file(fp).map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn open_buffer(&self, buffer: &[u8]) -> Result<VipsImage> {
        let mut img = VipsImage::new_from_buffer(buffer, "").map_err(|e| self.err(e))?;
        img.image_wio_input().map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    /// Decodes and caches an image under the given key. Re-renders of
    /// the same session hit the cache instead of decoding again.
    pub fn cache_bytes(&mut self, key: impl AsRef<str>, buffer: &[u8]) -> Result<()> {
        let key_str = key.as_ref();
        if !self.cache.contains_key(key_str) {
            let img = self.open_buffer(buffer)?;
            self.cache.insert(key_str.to_string(), img);
        }
        Ok(())
    }

    pub fn get_cached(&self, key: impl AsRef<str>) -> Result<&VipsImage> {
        let key_str = key.as_ref();
        self.cache
            .get(key_str)
            .ok_or_else(|| Error::ImageCacheMiss(key_str.to_string()))
    }

    pub fn scale(&self, img: &VipsImage, sx: f64, sy: f64) -> Result<VipsImage> {
        ops::resize_with_opts(
            &img,
            sx,
            &ops::ResizeOptions {
                vscale: sy,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))
    }

    pub fn scale_to_fit(
        &self,
        img: &VipsImage,
        w: f64,
        h: f64,
        mode: FitMode,
    ) -> Result<VipsImage> {
        let (iw, ih) = (img.get_width() as f64, img.get_height() as f64);
        let (sx, sy) = match mode {
            FitMode::Cover => {
                let s = (w / iw).max(h / ih);
                (s, s)
            }
            FitMode::Contain => {
                let s = (w / iw).min(h / ih);
                (s, s)
            }
            FitMode::Stretch => (w / iw, h / ih),
        };
        self.scale(img, sx, sy)
    }

    /// Alpha-over composites `src` onto `base` with its top-left corner
    /// at `(x, y)` in base coordinates. Parts of `src` falling outside
    /// the base are cropped, the base keeps its dimensions.
    pub fn overlay(&self, base: &VipsImage, src: &VipsImage, x: i32, y: i32) -> Result<VipsImage> {
        let (bw, bh) = (base.get_width(), base.get_height());
        let src = ops::embed(&src, x, y, bw, bh).map_err(|e| self.err(e))?;
        ops::composite_2(&base, &src, ops::BlendMode::Over).map_err(|e| self.err(e))
    }

    /// Lays out and rasterizes a run of text. The text is never wrapped;
    /// explicit newlines produce multiple lines. Returns the image plus
    /// its logical extents in pixels.
    pub fn print(
        &self,
        text: &str,
        desc: &pango::FontDescription,
        color: Color,
    ) -> Result<(VipsImage, i32, i32)> {
        let err = |e: cairo::Error| Error::CairoError(e.to_string());
        let ctx = pangocairo::FontMap::new().create_context();
        let layout = pango::Layout::new(&ctx);

        let mut opt = cairo::FontOptions::new().map_err(err)?;
        opt.set_antialias(cairo::Antialias::Good);
        pangocairo::functions::context_set_font_options(&ctx, Some(&opt));

        layout.set_font_description(Some(desc));
        layout.set_text(text);

        let (_, log_rect) = layout.extents();
        let w = (log_rect.width() / pango::SCALE).max(1);
        let h = (log_rect.height() / pango::SCALE).max(1);
        let base = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h).map_err(err)?;
        {
            let cr = cairo::Context::new(&base).map_err(err)?;
            let (r, g, b, a) = color.rgba();
            cr.set_source_rgba(r, g, b, a);
            pangocairo::functions::show_layout(&cr, &layout);
        }
        let img = self.cairo_to_vips(base)?;
        Ok((img, w, h))
    }

    pub fn write(&self, img: &VipsImage, path: impl AsRef<str>) -> Result<()> {
        ops::pngsave(img, path.as_ref()).map_err(|e| self.err(e))
    }
}
