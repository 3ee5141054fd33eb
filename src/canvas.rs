//! The composition canvas: a pure visual projection of a session, and
//! its rasterization into a mounted surface.

use crate::error::Result;
use crate::image::{Color, FitMode, ImgBackend};
use crate::session::{LayerId, Position, Session};
use crate::text::FontMap;

use libvips::VipsImage;

/// Canvas dimensions, shared by the live view and the exported bitmap.
/// Logical layer coordinates map 1:1 onto raster pixels.
pub const CANVAS_WIDTH: i32 = 300;
pub const CANVAS_HEIGHT: i32 = 300;

pub struct RenderContext<'a> {
    pub backend: &'a mut ImgBackend,
    pub fonts: &'a mut FontMap,
    pub font: &'a str,
}

/// The base image region: scaled to cover the canvas, centered, with
/// the overflow cropped.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseNode {
    pub key: String,
    pub fit: FitMode,
}

/// One text layer as drawn: at its position, with its size and color,
/// never wrapped. Text overflowing the canvas extends past the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub layer: LayerId,
    pub text: String,
    pub position: Position,
    pub font_size: f64,
    pub color: Color,
}

/// What the canvas shows for a given session. Building the tree is a
/// pure function of the session: same session, equal tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub width: i32,
    pub height: i32,
    pub background: Color,
    pub base: BaseNode,
    pub texts: Vec<TextNode>,
}

impl VisualTree {
    pub fn build(session: &Session) -> VisualTree {
        let texts = session
            .layers()
            .iter()
            .map(|layer| TextNode {
                layer: layer.id,
                text: layer.text.clone(),
                position: layer.position,
                font_size: layer.font_size,
                color: layer.color,
            })
            .collect();
        VisualTree {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            background: Color::WHITE,
            base: BaseNode {
                key: session.base_image().url.clone(),
                fit: FitMode::Cover,
            },
            texts,
        }
    }
}

/// Pixel bounding box of a rendered text node, in canvas coordinates.
/// Used by drag hit-testing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeBounds {
    pub layer: LayerId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NodeBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// The baked composition: exact pixels plus per-node bounds.
pub struct MountedSurface {
    pub image: VipsImage,
    pub bounds: Vec<NodeBounds>,
}

/// Fixed-size surface that renders a visual tree and keeps the result
/// mounted for hit-testing and export capture.
pub struct CompositionCanvas {
    width: i32,
    height: i32,
    mounted: Option<MountedSurface>,
}

impl CompositionCanvas {
    pub fn new() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            mounted: None,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// The last rendered surface, if any render has happened yet.
    pub fn mounted(&self) -> Option<&MountedSurface> {
        self.mounted.as_ref()
    }

    /// Unmounts the current surface, e.g. when a new session starts.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }

    /// Rasterizes the tree and replaces the mounted surface. On error
    /// the previous mount is kept, so hit-testing and export keep
    /// working against the last good render.
    pub fn render(&mut self, tree: &VisualTree, ctx: &mut RenderContext) -> Result<()> {
        let RenderContext {
            backend,
            fonts,
            font,
        } = ctx;

        let mut img = backend.new_canvas(&tree.background, tree.width, tree.height)?;

        let base = backend.get_cached(&tree.base.key)?;
        let base = backend.scale_to_fit(base, tree.width as f64, tree.height as f64, tree.base.fit)?;
        let x = (tree.width - base.get_width()) / 2;
        let y = (tree.height - base.get_height()) / 2;
        img = backend.overlay(&img, &base, x, y)?;

        let mut bounds = Vec::with_capacity(tree.texts.len());
        for node in &tree.texts {
            let desc = fonts.desc_px(font, node.font_size)?;
            let (text_img, w, h) = backend.print(&node.text, &desc, node.color)?;
            let (tx, ty) = (node.position.x.round() as i32, node.position.y.round() as i32);
            img = backend.overlay(&img, &text_img, tx, ty)?;
            bounds.push(NodeBounds {
                layer: node.layer,
                x: node.position.x,
                y: node.position.y,
                w: w as f64,
                h: h as f64,
            });
        }

        self.mounted = Some(MountedSurface { image: img, bounds });
        Ok(())
    }
}

impl Default for CompositionCanvas {
    fn default() -> Self {
        Self::new()
    }
}
