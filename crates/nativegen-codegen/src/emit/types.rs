use super::{CodeWriter, Emitter, BANNER};
use crate::typemap::wrapper_name;

impl Emitter<'_> {
    /// Render the wrapper-type header: one struct per registered type, then
    /// an empty struct per type that only exists as a namespace.
    pub fn wrapper_types(&self, empty_types: &[String]) -> String {
        let mut w = CodeWriter::new();
        w.writeln(BANNER);
        w.writeln("#include \"scripthook/types.h\"");

        for ty in self.registry.iter() {
            let name = wrapper_name(&ty.name);
            let base = match &ty.parent {
                Some(parent) => {
                    let parent = wrapper_name(parent);
                    w.writeln(&format!("struct {}:{}{{", name, parent));
                    parent
                }
                None => {
                    w.writeln(&format!("struct {}{{", name));
                    w.indent += 1;
                    w.writeln(&format!("{} id=0;", ty.storage));
                    w.indent -= 1;
                    "id".to_string()
                }
            };

            w.indent += 1;
            for scalar in ["int", "DWORD"] {
                w.writeln(&format!("{}({} i): {}(i){{}}", name, scalar, base));
            }
            for scalar in ["int", "DWORD"] {
                w.writeln(&format!("{}&operator=({} i) {{ id = i; return *this; }}", name, scalar));
            }
            for scalar in ["int", "DWORD"] {
                w.writeln(&format!("operator {}() {{ return id; }}", scalar));
            }
            w.indent -= 1;
            w.writeln("};");
        }

        for ty in empty_types {
            w.writeln(&format!("struct {}{{}};", wrapper_name(ty)));
        }

        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativegen_config::{MappingConfig, TypeEntry, TypeRegistry};

    #[test]
    fn test_wrapper_inheritance() {
        let registry = TypeRegistry::new(vec![
            TypeEntry::new("Any", "DWORD"),
            TypeEntry::new("Entity", "int").with_parent("Any"),
        ])
        .unwrap();
        let mapping = MappingConfig::default();
        let out = Emitter::new(&registry, &mapping).wrapper_types(&["Misc".to_string()]);

        let expected = "\
// This file is auto-generated, do NOT edit!
#include \"scripthook/types.h\"
struct Py_Any{
\tDWORD id=0;
\tPy_Any(int i): id(i){}
\tPy_Any(DWORD i): id(i){}
\tPy_Any&operator=(int i) { id = i; return *this; }
\tPy_Any&operator=(DWORD i) { id = i; return *this; }
\toperator int() { return id; }
\toperator DWORD() { return id; }
};
struct Py_Entity:Py_Any{
\tPy_Entity(int i): Py_Any(i){}
\tPy_Entity(DWORD i): Py_Any(i){}
\tPy_Entity&operator=(int i) { id = i; return *this; }
\tPy_Entity&operator=(DWORD i) { id = i; return *this; }
\toperator int() { return id; }
\toperator DWORD() { return id; }
};
struct Py_Misc{};
";
        pretty_assertions::assert_eq!(out, expected);
    }

    #[test]
    fn test_base_struct_precedes_derived() {
        let registry = TypeRegistry::new(vec![
            TypeEntry::new("Ped", "int").with_parent("Entity"),
            TypeEntry::new("Entity", "int"),
        ])
        .unwrap();
        let mapping = MappingConfig::default();
        let out = Emitter::new(&registry, &mapping).wrapper_types(&[]);

        let base = out.find("struct Py_Entity{").unwrap();
        let derived = out.find("struct Py_Ped:Py_Entity{").unwrap();
        assert!(base < derived, "{}", out);
    }
}
