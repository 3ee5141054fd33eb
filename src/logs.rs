//! Leveled stderr logging with colored labels.

use std::io::{stderr, Stderr, Write};

#[derive(Debug)]
pub struct Logger<T: Write> {
    tty: T,
    quiet: bool,
}

impl Logger<Stderr> {
    pub fn new_stderr(quiet: bool) -> Self {
        Self::new(stderr(), quiet)
    }
}

impl<T: Write> Logger<T> {
    pub fn new(tty: T, quiet: bool) -> Self {
        Self { tty, quiet }
    }

    pub fn info(&mut self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.log("INFO", termion::color::LightBlack, msg.as_ref());
        }
    }

    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.log("WARN", termion::color::LightYellow, msg.as_ref());
    }

    pub fn error(&mut self, msg: impl AsRef<str>) {
        self.log("ERROR", termion::color::LightRed, msg.as_ref());
    }

    fn log(&mut self, label: &'static str, color: impl termion::color::Color, msg: &str) {
        let color = termion::color::Fg(color);
        let reset = termion::style::Reset;
        // logging must never fault the editor
        let _ = writeln!(self.tty, "{color}[{label}] {reset}{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_drops_info_but_not_warnings() {
        let mut logger = Logger::new(Vec::new(), true);
        logger.info("loaded catalog");
        logger.warn("catalog fetch failed");
        let out = String::from_utf8(logger.tty).unwrap();
        assert!(!out.contains("loaded catalog"));
        assert!(out.contains("catalog fetch failed"));
        assert!(out.contains("[WARN]"));
    }
}
