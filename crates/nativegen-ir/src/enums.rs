use nativegen_common::Span;

/// One entry of an enumeration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratorEntry {
    /// Identifier as written in the header; bound symbolically.
    pub ident: String,
    /// Whether the source assigned an explicit value. The value itself is
    /// never evaluated.
    pub has_explicit_value: bool,
    /// Lowercase underscore name exposed through the binding.
    pub exposed_name: String,
}

/// An enumeration block harvested from the enum header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    /// Entries in source order.
    pub entries: Vec<EnumeratorEntry>,
    pub span: Span,
}
