//! Implements utilities to create color values.

use regex::Regex;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: None,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: None,
    };

    pub fn rgba(&self) -> (f64, f64, f64, f64) {
        (self.r, self.g, self.b, self.a.unwrap_or(1.0))
    }

    pub fn scaled_rgba(&self) -> (f64, f64, f64, f64) {
        (
            self.r * 255.0,
            self.g * 255.0,
            self.b * 255.0,
            self.a.map(|a| a * 255.0).unwrap_or(255.0),
        )
    }
}

impl FromStr for Color {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re =
            Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})?$")
                .unwrap();

        let captures = re
            .captures(s)
            .ok_or("string not in form #RRGGBB or #RRGGBBAA")?;
        let mut values = captures
            .iter()
            .skip(1)
            .map(|c| c.map(|v| u8::from_str_radix(v.as_str(), 16).unwrap()));
        let r = values.next().unwrap().unwrap_or(0) as f64 / 255.0;
        let g = values.next().unwrap().unwrap_or(0) as f64 / 255.0;
        let b = values.next().unwrap().unwrap_or(0) as f64 / 255.0;
        let a = values.next().unwrap().map(|x| x as f64 / 255.0);
        Ok(Color { r, g, b, a })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { r, g, b, a } = *self;
        let r = (r.clamp(0.0, 1.0) * 255.0) as u8;
        let g = (g.clamp(0.0, 1.0) * 255.0) as u8;
        let b = (b.clamp(0.0, 1.0) * 255.0) as u8;
        if let Some(a) = a {
            let a = (a.clamp(0.0, 1.0) * 255.0) as u8;
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_hex() {
        let c: Color = "#FF8000".parse().unwrap();
        assert_eq!(c.to_string(), "#FF8000");
        assert!(c.a.is_none());
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!("FF8000".parse::<Color>().is_err());
        assert!("#F80".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
    }
}
