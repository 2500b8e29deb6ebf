//! Header scanning for the native binding generator.
//!
//! ```text
//! enum header    -> strip comments -> enum blocks       -> EnumDescriptor
//! natives header -> strip comments -> namespace blocks  -> Declaration
//! ```
//!
//! Malformed blocks never abort a scan: they are skipped and reported as
//! warnings next to whatever could be recovered.

mod comments;
mod enums;
mod natives;
mod scanner;

pub use comments::strip_comments;
pub use enums::{exposed_enum_name, harvest_enums};
pub use natives::parse_declarations;
pub use scanner::{ScanError, Scanner};

use nativegen_common::Diagnostic;
use nativegen_ir::{Declaration, EnumDescriptor};

/// Items recovered from a header plus the problems met along the way.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

/// Strip comments from an enum header and harvest its enumerations.
pub fn parse_enum_header(raw: &str) -> Parsed<EnumDescriptor> {
    harvest_enums(&strip_comments(raw))
}

/// Strip comments from a natives header and extract its declarations.
pub fn parse_natives_header(raw: &str) -> Parsed<Declaration> {
    parse_declarations(&strip_comments(raw))
}
