use nativegen_common::{namespace_type_name, Span};

/// A function parameter, split on the last whitespace boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }

    pub fn is_pointer(&self) -> bool {
        self.ty.ends_with('*')
    }
}

/// A native function declaration found inside a namespace block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub namespace: String,
    pub return_type: String,
    pub name: String,
    pub params: Vec<Parameter>,
    pub span: Span,
}

impl Declaration {
    /// `NAMESPACE::FunctionName`
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    /// Logical type this declaration's namespace maps to.
    pub fn type_name(&self) -> String {
        namespace_type_name(&self.namespace)
    }
}
