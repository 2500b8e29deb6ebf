//! Classification of native declarations into per-type members and emission
//! of the binding artifacts.
//!
//! ```text
//! Declaration -> FilterRules -> KIND_RULES -> TypeBucket -> Emitter -> artifacts
//! ```

mod classify;
mod emit;
mod rules;
mod typemap;

pub use classify::{short_name, Classification, Classifier};
pub use emit::{Emitter, NativesOutput};
pub use rules::{classify_shape, FilterRule, FilterRules, KindRule, NamePredicate, Shape, Verdict, KIND_RULES};
pub use typemap::{MappedParam, TypeMapper};
