//! Mapping of declared C types onto wrapper types or accepted primitives.

use nativegen_config::{MappingConfig, TypeRegistry};
use nativegen_ir::MappingFailure;

/// A parameter as it appears in a wrapper lambda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedParam {
    /// Lambda parameter declaration, e.g. `Py_Ped ped`.
    pub decl: String,
    /// Argument passed to the native, e.g. `ped.id`.
    pub arg: String,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    registry: &'a TypeRegistry,
    mapping: &'a MappingConfig,
}

/// Name of the generated wrapper struct for a logical type.
pub fn wrapper_name(ty: &str) -> String {
    format!("Py_{}", ty)
}

impl<'a> TypeMapper<'a> {
    pub fn new(registry: &'a TypeRegistry, mapping: &'a MappingConfig) -> Self {
        Self { registry, mapping }
    }

    /// Wrapper types unwrap to their handle; accepted primitives pass through.
    pub fn param(&self, index: usize, ty: &str, name: &str) -> Result<MappedParam, MappingFailure> {
        if self.registry.contains(ty) {
            Ok(MappedParam {
                decl: format!("{} {}", wrapper_name(ty), name),
                arg: format!("{}.id", name),
            })
        } else if self.mapping.accepts_param(ty) {
            Ok(MappedParam {
                decl: format!("{} {}", ty, name),
                arg: name.to_string(),
            })
        } else {
            Err(MappingFailure::Parameter {
                index,
                ty: ty.to_string(),
            })
        }
    }

    pub fn ret(&self, ty: &str) -> Result<String, MappingFailure> {
        if self.registry.contains(ty) {
            Ok(wrapper_name(ty))
        } else if self.mapping.accepts_return(ty) {
            Ok(ty.to_string())
        } else {
            Err(MappingFailure::Return { ty: ty.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativegen_config::GeneratorConfig;

    #[test]
    fn test_param_mapping() {
        let config = GeneratorConfig::default();
        let registry = config.registry().unwrap();
        let mapper = TypeMapper::new(&registry, &config.mapping);

        let ped = mapper.param(0, "Ped", "ped").unwrap();
        assert_eq!(ped.decl, "Py_Ped ped");
        assert_eq!(ped.arg, "ped.id");

        let text = mapper.param(1, "char*", "text").unwrap();
        assert_eq!(text.decl, "char* text");
        assert_eq!(text.arg, "text");

        assert_eq!(
            mapper.param(2, "Any*", "p2"),
            Err(MappingFailure::Parameter { index: 2, ty: "Any*".to_string() })
        );
        assert!(mapper.param(0, "Vector3", "v").is_err());
    }

    #[test]
    fn test_return_mapping() {
        let config = GeneratorConfig::default();
        let registry = config.registry().unwrap();
        let mapper = TypeMapper::new(&registry, &config.mapping);

        assert_eq!(mapper.ret("Hash").unwrap(), "Py_Hash");
        assert_eq!(mapper.ret("void").unwrap(), "void");
        assert_eq!(mapper.ret("Vector3").unwrap(), "Vector3");
        assert_eq!(mapper.ret("BOOL").unwrap(), "BOOL");
        assert_eq!(mapper.ret("Vector3*"), Err(MappingFailure::Return { ty: "Vector3*".to_string() }));
    }
}
