//! Configuration for the native binding generator.
//!
//! This crate provides:
//! - The generator configuration format (`nativegen.toml`)
//! - The validated, ordered type registry
//! - Scanning of hand-written sources for overridden natives
//!
//! # Example
//!
//! ```toml
//! # nativegen.toml
//! [output]
//! enums = true
//! natives = true
//!
//! [classify]
//! hex_prefix = "_0x"
//! hex_exempt = ["set_control"]
//!
//! [[type]]
//! name = "Entity"
//! storage = "int"
//! parent = "Any"
//! ```

mod config;
mod error;
mod overrides;
mod registry;

pub use config::{ClassifyConfig, GeneratorConfig, MappingConfig, OutputToggles, TypeEntry};
pub use error::{ConfigError, Result};
pub use overrides::OverrideSet;
pub use registry::{TypeDescriptor, TypeRegistry};
