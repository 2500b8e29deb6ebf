mod bucket;
mod decl;
mod enums;
mod member;
mod outcome;

pub use bucket::{MemberGroups, Property, TypeBucket};
pub use decl::{Declaration, Parameter};
pub use enums::{EnumDescriptor, EnumeratorEntry};
pub use member::{ClassifiedMember, MemberKind};
pub use outcome::{MappingFailure, SkipReason};
