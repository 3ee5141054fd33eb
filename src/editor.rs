//! The editor: a single-threaded event loop over one session.

use crate::canvas::{CompositionCanvas, RenderContext, VisualTree};
use crate::drag::DragController;
use crate::error::Result;
use crate::export::{ExportOutcome, Exporter, OutputSink};
use crate::session::{BaseImage, LayerId, Position, Session};
use crate::style::StyleEditor;

/// User input, processed one event at a time. There is no concurrent
/// writer: every mutation happens inside `Editor::apply`.
#[derive(Debug, Clone)]
pub enum Event {
    /// Pick a different base image, discarding the current session.
    SelectBase(BaseImage),
    AddLayer,
    EditText(String),
    EditFontSize(f64),
    EditColor(String),
    /// Direct position commit, e.g. from a scripted edit. Interactive
    /// moves go through the pointer events instead.
    MoveLayer(LayerId, Position),
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
}

/// Owns the session and its controllers. Mutating events mark the
/// canvas dirty; `sync` re-renders once per batch of mutations.
pub struct Editor {
    session: Session,
    style: StyleEditor,
    drag: DragController,
    canvas: CompositionCanvas,
    exporter: Exporter,
    dirty: bool,
}

impl Editor {
    pub fn new(base: BaseImage) -> Self {
        Self {
            session: Session::new(base),
            style: StyleEditor,
            drag: DragController::new(),
            canvas: CompositionCanvas::new(),
            exporter: Exporter::new(),
            dirty: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn canvas(&self) -> &CompositionCanvas {
        &self.canvas
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn style(&self) -> &StyleEditor {
        &self.style
    }

    pub fn set_output(&mut self, path: impl Into<std::path::PathBuf>) {
        self.exporter = Exporter::with_path(path);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Applies one event to the session. Invalid mutations (no active
    /// layer, unknown id, pointer outside every layer) are silent
    /// no-ops, per the session's contract.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::SelectBase(img) => {
                self.session = Session::new(img);
                self.drag.cancel();
                self.canvas.unmount();
                self.dirty = true;
            }
            Event::AddLayer => {
                self.session.add_layer();
                self.dirty = true;
            }
            Event::EditText(text) => {
                self.style.set_text(&mut self.session, text);
                self.dirty = true;
            }
            Event::EditFontSize(size) => {
                self.style.set_font_size(&mut self.session, size);
                self.dirty = true;
            }
            Event::EditColor(color) => {
                if self.style.set_color(&mut self.session, &color) {
                    self.dirty = true;
                }
            }
            Event::MoveLayer(id, pos) => {
                self.session.update_layer_position(id, pos);
                self.dirty = true;
            }
            Event::PointerDown { x, y } => {
                let bounds = self
                    .canvas
                    .mounted()
                    .map(|m| m.bounds.as_slice())
                    .unwrap_or(&[]);
                self.drag.pointer_down(bounds, x, y);
            }
            Event::PointerMove { x, y } => self.drag.pointer_move(x, y),
            Event::PointerUp => {
                if self.drag.pointer_up(&mut self.session).is_some() {
                    self.dirty = true;
                }
            }
        }
    }

    /// Re-renders the canvas from the current session if anything
    /// changed since the last render. Rendering is a pure function of
    /// the session snapshot, so applying the same events twice mounts
    /// the same surface.
    pub fn sync(&mut self, ctx: &mut RenderContext) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let tree = VisualTree::build(&self.session.snapshot());
        self.canvas.render(&tree, ctx)?;
        self.dirty = false;
        Ok(())
    }

    /// Captures the mounted surface into the output file. Safe no-op
    /// before the first render.
    pub fn export(&mut self, sink: &impl OutputSink) -> Result<ExportOutcome> {
        self.exporter.export(&self.canvas, sink)
    }
}
