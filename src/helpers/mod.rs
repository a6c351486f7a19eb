//! Helper functions for page rendering
//!
//! URL generation, HTML snippets and date formatting shared by the
//! normalizer, the page templates and the server.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
