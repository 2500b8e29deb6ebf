use std::fmt;
use thiserror::Error;

/// Why a declaration was deliberately left out of generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A hand-written implementation exists.
    Override,
    /// Unnamed native whose name starts with the hex marker.
    HexName,
    /// A later declaration with the same kind and exposed name replaced it.
    Shadowed { by: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Override => f.write_str("hand-written override"),
            SkipReason::HexName => f.write_str("unnamed hex native"),
            SkipReason::Shadowed { by } => write!(f, "shadowed by {}", by),
        }
    }
}

/// A type that is neither a wrapper type nor an accepted primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingFailure {
    #[error("parameter {index} has unmappable type `{ty}`")]
    Parameter { index: usize, ty: String },
    #[error("unmappable return type `{ty}`")]
    Return { ty: String },
}
