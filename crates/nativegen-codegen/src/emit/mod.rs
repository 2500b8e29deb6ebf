//! Rendering of the binding artifacts.
//!
//! Output only depends on the order of the registry and on sorted
//! collections, so identical inputs always render byte-identical text.

mod enums;
mod natives;
mod types;

use crate::typemap::TypeMapper;
use nativegen_config::{MappingConfig, TypeRegistry};

pub use natives::NativesOutput;

const BANNER: &str = "// This file is auto-generated, do NOT edit!";

/// Artifact renderer.
pub struct Emitter<'a> {
    registry: &'a TypeRegistry,
    mapper: TypeMapper<'a>,
}

impl<'a> Emitter<'a> {
    pub fn new(registry: &'a TypeRegistry, mapping: &'a MappingConfig) -> Self {
        Self {
            registry,
            mapper: TypeMapper::new(registry, mapping),
        }
    }
}

/// Line-oriented text buffer with tab indentation.
#[derive(Debug, Default)]
struct CodeWriter {
    output: String,
    indent: usize,
}

impl CodeWriter {
    fn new() -> Self {
        Self::default()
    }

    fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    fn finish(self) -> String {
        self.output
    }
}
