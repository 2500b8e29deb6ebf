//! Shared infrastructure for the native binding generator: byte spans,
//! header sources with line lookup, structural diagnostics and identifier
//! case conversion.

mod diagnostic;
mod naming;
mod source;
mod span;

pub use diagnostic::Diagnostic;
pub use naming::{camel_to_snake, namespace_type_name};
pub use source::SourceFile;
pub use span::Span;
