//! The editing session model: one base image plus an ordered stack of
//! text layers.

use crate::image::Color;

use serde::Deserialize;

/// Font size bounds enforced by the style controls, in pixels.
pub const MIN_FONT_SIZE: f64 = 10.0;
pub const MAX_FONT_SIZE: f64 = 100.0;

const DEFAULT_FONT_SIZE: f64 = 24.0;
const DEFAULT_POSITION: Position = Position { x: 10.0, y: 10.0 };

/// A candidate background picture, as served by the catalog provider.
/// Immutable once a session is built on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaseImage {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Pixel offset from the canvas top-left corner. Unconstrained: layers
/// may sit partially or fully outside the canvas.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Opaque identity token assigned to a layer at creation. Drag gestures
/// and style edits address layers through this id, so appending layers
/// mid-gesture can never redirect an update.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

/// One draggable, styleable text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub id: LayerId,
    pub text: String,
    pub position: Position,
    pub font_size: f64,
    pub color: Color,
}

impl TextLayer {
    fn new(id: LayerId) -> Self {
        Self {
            id,
            text: String::new(),
            position: DEFAULT_POSITION,
            font_size: DEFAULT_FONT_SIZE,
            color: Color::BLACK,
        }
    }
}

/// A partial style update, applied to the active layer. Absent fields
/// leave the current value untouched.
#[derive(Debug, Clone, Default)]
pub struct StylePatch {
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<Color>,
}

/// The authoritative state of one editing session. Layer order is
/// z-order: later entries render on top. Layers are only ever appended,
/// never removed or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    base_image: BaseImage,
    layers: Vec<TextLayer>,
    active: Option<LayerId>,
    next_id: u64,
}

impl Session {
    /// Starts a session on the given base image, with no layers. A
    /// session is discarded, not reused, when a different base image is
    /// picked.
    pub fn new(base_image: BaseImage) -> Self {
        Self {
            base_image,
            layers: Vec::new(),
            active: None,
            next_id: 0,
        }
    }

    pub fn base_image(&self) -> &BaseImage {
        &self.base_image
    }

    pub fn layers(&self) -> &[TextLayer] {
        &self.layers
    }

    pub fn active_id(&self) -> Option<LayerId> {
        self.active
    }

    pub fn layer(&self, id: LayerId) -> Option<&TextLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn active_layer(&self) -> Option<&TextLayer> {
        self.active.and_then(|id| self.layer(id))
    }

    /// Appends a default layer, makes it the active one, and returns
    /// its id. Always succeeds.
    pub fn add_layer(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(TextLayer::new(id));
        self.active = Some(id);
        id
    }

    /// Makes the given layer the target of style edits. Unknown ids are
    /// ignored.
    pub fn select_layer(&mut self, id: LayerId) {
        if self.layers.iter().any(|l| l.id == id) {
            self.active = Some(id);
        }
    }

    /// Applies a style patch to the active layer. With no active layer
    /// (empty session) this is a no-op; it never creates one implicitly.
    pub fn update_active(&mut self, patch: StylePatch) {
        let Some(id) = self.active else { return };
        let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) else {
            return;
        };
        if let Some(text) = patch.text {
            layer.text = text;
        }
        if let Some(size) = patch.font_size {
            layer.font_size = size;
        }
        if let Some(color) = patch.color {
            layer.color = color;
        }
    }

    /// Moves the layer with the given id. Unknown ids are ignored, so a
    /// stale drag commit can never fault the session.
    pub fn update_layer_position(&mut self, id: LayerId, pos: Position) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            layer.position = pos;
        }
    }

    /// An owned copy for the renderer to consume as a plain value.
    pub fn snapshot(&self) -> Session {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> BaseImage {
        BaseImage {
            id: "61579".into(),
            name: "One Does Not Simply".into(),
            url: "https://i.imgflip.com/1bij.jpg".into(),
        }
    }

    #[test]
    fn new_session_has_no_layers() {
        let s = Session::new(base());
        assert!(s.layers().is_empty());
        assert_eq!(s.active_id(), None);
    }

    #[test]
    fn add_layer_appends_defaults_and_activates() {
        let mut s = Session::new(base());
        let id = s.add_layer();
        assert_eq!(s.layers().len(), 1);
        assert_eq!(s.active_id(), Some(id));
        let layer = s.layer(id).unwrap();
        assert_eq!(layer.text, "");
        assert_eq!(layer.position, Position::new(10.0, 10.0));
        assert_eq!(layer.font_size, 24.0);
        assert_eq!(layer.color, Color::BLACK);
    }

    #[test]
    fn update_active_on_empty_session_is_noop() {
        let mut s = Session::new(base());
        let before = s.snapshot();
        s.update_active(StylePatch {
            text: Some("TOP".into()),
            ..Default::default()
        });
        assert_eq!(s, before);
    }

    #[test]
    fn update_position_with_unknown_id_is_noop() {
        let mut s = Session::new(base());
        let id = s.add_layer();
        let mut other = Session::new(base());
        other.add_layer();
        let foreign = other.add_layer();
        let before = s.snapshot();
        s.update_layer_position(foreign, Position::new(99.0, 99.0));
        assert_eq!(s, before);
        assert_eq!(s.layer(id).unwrap().position, Position::new(10.0, 10.0));
    }

    #[test]
    fn style_edits_target_only_the_newest_layer() {
        let mut s = Session::new(base());
        for _ in 0..4 {
            s.add_layer();
        }
        s.update_active(StylePatch {
            text: Some("BOTTOM".into()),
            ..Default::default()
        });
        let layers = s.layers();
        for layer in &layers[..3] {
            assert_eq!(layer.text, "");
        }
        assert_eq!(layers[3].text, "BOTTOM");
    }

    #[test]
    fn select_layer_redirects_edits() {
        let mut s = Session::new(base());
        let first = s.add_layer();
        s.add_layer();
        s.select_layer(first);
        s.update_active(StylePatch {
            font_size: Some(48.0),
            ..Default::default()
        });
        assert_eq!(s.layer(first).unwrap().font_size, 48.0);
        assert_eq!(s.layers()[1].font_size, 24.0);
    }
}
