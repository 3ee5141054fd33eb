//! # Memetica
//!
//! A library to compose styled text layers over a base image and export
//! the result as a PNG bitmap.

pub mod canvas;
pub mod catalog;
pub mod cli;
pub mod drag;
pub mod editor;
pub mod error;
pub mod export;
pub mod image;
pub mod logs;
pub mod session;
pub mod style;
pub mod text;

pub use error::{Error, Result};
