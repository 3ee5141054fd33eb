//! The style controls: text content, font size and color, writing
//! through to the session's active layer.

use crate::image::Color;
use crate::session::{Session, StylePatch, MAX_FONT_SIZE, MIN_FONT_SIZE};

/// Write-through bindings for the three style controls. With no layer
/// in the session every setter is a no-op and the displayed values fall
/// back to the layer defaults, never to an error state. Values are
/// validated here, at the control, so nothing out of range reaches the
/// model.
#[derive(Debug, Default)]
pub struct StyleEditor;

impl StyleEditor {
    pub fn set_text(&self, session: &mut Session, text: impl Into<String>) {
        session.update_active(StylePatch {
            text: Some(text.into()),
            ..Default::default()
        });
    }

    /// Clamps to [10, 100] px before it reaches the model. Non-finite
    /// input is rejected.
    pub fn set_font_size(&self, session: &mut Session, size: f64) {
        if !size.is_finite() {
            return;
        }
        session.update_active(StylePatch {
            font_size: Some(size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)),
            ..Default::default()
        });
    }

    /// Parses a `#RRGGBB` string; malformed input is rejected and the
    /// model left untouched. Returns whether the value was accepted.
    pub fn set_color(&self, session: &mut Session, color: &str) -> bool {
        match color.parse::<Color>() {
            Ok(color) => {
                session.update_active(StylePatch {
                    color: Some(color),
                    ..Default::default()
                });
                true
            }
            Err(_) => false,
        }
    }

    pub fn displayed_font_size(&self, session: &Session) -> f64 {
        session.active_layer().map(|l| l.font_size).unwrap_or(24.0)
    }

    pub fn displayed_color(&self, session: &Session) -> Color {
        session
            .active_layer()
            .map(|l| l.color)
            .unwrap_or(Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BaseImage;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(BaseImage {
            id: "87743020".into(),
            name: "Two Buttons".into(),
            url: "https://i.imgflip.com/1g8my4.jpg".into(),
        })
    }

    #[test]
    fn displayed_values_default_before_any_layer() {
        let s = session();
        let style = StyleEditor;
        assert_eq!(style.displayed_font_size(&s), 24.0);
        assert_eq!(style.displayed_color(&s), Color::BLACK);
    }

    #[test]
    fn font_size_is_clamped_at_the_control() {
        let mut s = session();
        let style = StyleEditor;
        s.add_layer();
        style.set_font_size(&mut s, 150.0);
        assert_eq!(s.active_layer().unwrap().font_size, 100.0);
        style.set_font_size(&mut s, 3.0);
        assert_eq!(s.active_layer().unwrap().font_size, 10.0);
        style.set_font_size(&mut s, f64::NAN);
        assert_eq!(s.active_layer().unwrap().font_size, 10.0);
    }

    #[test]
    fn malformed_color_never_reaches_the_model() {
        let mut s = session();
        let style = StyleEditor;
        s.add_layer();
        assert!(!style.set_color(&mut s, "red"));
        assert_eq!(s.active_layer().unwrap().color, Color::BLACK);
        assert!(style.set_color(&mut s, "#FF0000"));
        assert_eq!(s.active_layer().unwrap().color, "#FF0000".parse().unwrap());
    }

    #[test]
    fn setters_on_empty_session_are_noops() {
        let mut s = session();
        let style = StyleEditor;
        let before = s.snapshot();
        style.set_text(&mut s, "TOP");
        style.set_font_size(&mut s, 50.0);
        style.set_color(&mut s, "#00FF00");
        assert_eq!(s, before);
    }
}
