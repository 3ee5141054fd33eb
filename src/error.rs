//! Common error types.

/// A shortcut type equivalent to `Result<T, memetica::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that occurs within the crate.
#[derive(Debug)]
pub enum Error {
    VipsError(String),
    CairoError(String),
    ImageConversionError(&'static str, &'static str),
    ImageCacheMiss(String),
    FontconfigInit,
    FontMatchError(String),
    InvalidCString(String),
    ProviderError(String),
    MalformedCatalog(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::VipsError(e) => write!(f, "image backend error: {e}"),
            Error::CairoError(e) => write!(f, "cairo error: {e}"),
            Error::ImageConversionError(from, to) => {
                write!(f, "failed to convert image from {from} to {to}")
            }
            Error::ImageCacheMiss(key) => write!(f, "image `{key}` was never loaded"),
            Error::FontconfigInit => write!(f, "failed to initialize fontconfig"),
            Error::FontMatchError(family) => write!(f, "no font matches family `{family}`"),
            Error::InvalidCString(s) => write!(f, "invalid C string: {s}"),
            Error::ProviderError(e) => write!(f, "catalog provider error: {e}"),
            Error::MalformedCatalog(e) => write!(f, "malformed catalog payload: {e}"),
            Error::IoError(e) => write!(f, "io error: {e}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e)
    }
}
