//! Font resolution through fontconfig.

use crate::error::{Error, Result};

use fontconfig::{Fontconfig, Pattern};
use fontconfig_sys::fontconfig as sys;
use std::collections::HashMap;
use std::ffi::CString;

/// Family used for every text layer unless the caller picks another.
pub const DEFAULT_FONT: &str = "DejaVu Sans";

/// Resolves font family names to matched system fonts and builds pango
/// font descriptions with absolute (pixel) sizes. Matches are cached by
/// family, so re-renders do not query fontconfig again.
pub struct FontMap {
    fc: Fontconfig,
    resolved: HashMap<String, String>,
}

impl FontMap {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fc: Fontconfig::new().ok_or(Error::FontconfigInit)?,
            resolved: HashMap::new(),
        })
    }

    /// Best-match font name for a family, via fontconfig.
    pub fn resolve(&mut self, family: &str) -> Result<String> {
        if let Some(name) = self.resolved.get(family) {
            return Ok(name.clone());
        }
        let mut pat = Pattern::new(&self.fc);
        let c_family =
            CString::new(family).map_err(|_| Error::InvalidCString(family.to_string()))?;
        pat.add_string(sys::constants::FC_FAMILY.as_cstr(), &c_family);
        let matched = Pattern::from_pattern(&self.fc, pat.font_match().pat);
        let name = matched
            .name()
            .ok_or_else(|| Error::FontMatchError(family.to_string()))?
            .to_string();
        self.resolved.insert(family.to_string(), name.clone());
        Ok(name)
    }

    /// A pango description for the family at an absolute pixel size.
    /// Layer font sizes are defined in canvas pixels, so the size goes
    /// in as absolute rather than points (no dpi involved).
    pub fn desc_px(&mut self, family: &str, size: f64) -> Result<pango::FontDescription> {
        let name = self.resolve(family)?;
        let mut desc = pango::FontDescription::from_string(&name);
        desc.set_absolute_size(size * pango::SCALE as f64);
        Ok(desc)
    }
}
