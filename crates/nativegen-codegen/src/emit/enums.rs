use super::{CodeWriter, Emitter, BANNER};
use nativegen_ir::EnumDescriptor;

impl Emitter<'_> {
    /// Render the enum registration artifact. Every value is bound by its
    /// symbolic name so the host compiler supplies the numeric value.
    pub fn enums(&self, enums: &[EnumDescriptor]) -> String {
        let mut w = CodeWriter::new();
        w.writeln(BANNER);
        w.writeln("#include \"pybind11/pybind11.h\"");
        w.writeln("#include \"scripthook/enums.h\"");
        w.writeln("");
        w.writeln("namespace py = pybind11;");
        w.writeln("");
        w.writeln("void defEnums(py::module m) {");
        w.indent += 1;

        for e in enums {
            w.writeln(&format!("py::enum_<{}>(m, \"{}\")", e.name, e.name));
            w.indent += 1;
            for entry in &e.entries {
                w.writeln(&format!(".value(\"{}\",{}::{})", entry.exposed_name, e.name, entry.ident));
            }
            w.indent -= 1;
            w.writeln(";");
        }

        w.indent -= 1;
        w.writeln("}");
        w.finish()
    }
}
