//! Error types for nativegen-config.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for nativegen-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
///
/// All of these are fatal: a broken configuration stops the run before any
/// header is parsed.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file: {0}")]
    ReadConfig(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// Two registry entries share a name.
    #[error("Type `{0}` is registered more than once")]
    #[diagnostic(help("type names in the registry must be unique"))]
    DuplicateType(String),

    /// A registry entry names a parent that is not registered.
    #[error("Type `{ty}` inherits from unknown type `{parent}`")]
    #[diagnostic(help("register `{parent}` or drop the parent of `{ty}`"))]
    UnknownParent { ty: String, parent: String },

    /// Following parents from a type leads back to it.
    #[error("Inheritance cycle: {chain}")]
    ParentCycle { chain: String },
}
