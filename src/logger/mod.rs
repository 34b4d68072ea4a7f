//! Export of a finished game trace.
//!
//! - [`EventLogger`] — Writes a [`GameState`] trace as JSON, CSV or text, to a file or stdout
//! - [`Format`] — Supported encodings
//! - [`LogFile`] — The JSON document, reloadable for analysis
mod file;
mod format;
mod logger;

pub use file::*;
pub use format::*;
pub use logger::*;
