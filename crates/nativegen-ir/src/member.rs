use crate::decl::Declaration;
use std::fmt;

/// How a declaration is exposed on its logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    Getter,
    Setter,
    Method,
    Static,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemberKind::Getter => "getter",
            MemberKind::Setter => "setter",
            MemberKind::Method => "method",
            MemberKind::Static => "static",
        };
        f.write_str(s)
    }
}

/// A declaration together with its inferred kind and exposed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMember {
    pub kind: MemberKind,
    pub exposed_name: String,
    pub decl: Declaration,
}

impl ClassifiedMember {
    /// Member kinds receive the owning wrapper as their first argument.
    pub fn is_bound(&self) -> bool {
        self.kind != MemberKind::Static
    }
}
