use super::{CodeWriter, Emitter, BANNER};
use crate::classify::Classification;
use crate::typemap::wrapper_name;
use nativegen_ir::{ClassifiedMember, MappingFailure, TypeBucket};

const VECTOR3_BINDING: &str = "py::class_<Vector3>(m, \"Vector3\").def(\"__init__\", [](Vector3 &self, float x, float y, float z) {new (&self) Vector3{ x, 0, y, 0, z, 0 }; }).def_readwrite(\"x\", &Vector3::x).def_readwrite(\"y\", &Vector3::y).def_readwrite(\"z\", &Vector3::z);";

/// The two native artifacts plus the declarations that could not be mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativesOutput {
    /// Wrapper-type declarations (`natives_type.h`).
    pub types_header: String,
    /// Registration code (`natives.cpp`).
    pub registrations: String,
    /// Qualified names that need manual wrapping, in emission order.
    pub failed: Vec<String>,
}

impl Emitter<'_> {
    /// Render wrapper types and registration blocks for every registered
    /// type (registry order) and every namespace-only type (sorted).
    pub fn natives(&self, classification: Classification) -> NativesOutput {
        let mut buckets = classification.buckets;
        let empty_types = self.registry.empty_types(buckets.keys().map(String::as_str));
        let mut failed = Vec::new();

        let mut w = CodeWriter::new();
        w.writeln(BANNER);
        w.writeln("#include \"pybind11/pybind11.h\"");
        w.writeln("#include \"scripthook/natives.h\"");
        w.writeln("#include \"natives_type.h\"");
        w.writeln("namespace py = pybind11;");
        w.writeln("");

        let mut hooks: Vec<&str> = self.registry.names().chain(empty_types.iter().map(String::as_str)).collect();
        hooks.sort_unstable();
        for ty in hooks {
            w.writeln(&format!("void custom(py::class_<{}>);", wrapper_name(ty)));
        }
        w.writeln("");

        w.writeln("void defNatives(py::module m) {");
        w.indent += 1;
        w.writeln(VECTOR3_BINDING);

        for ty in self.registry.iter() {
            let wrapper = wrapper_name(&ty.name);
            let handle = format!("py_{}", ty.name);
            match &ty.parent {
                Some(parent) => w.writeln(&format!(
                    "py::class_<{}> {}(m, \"{}\",py_{});",
                    wrapper, handle, ty.name, parent
                )),
                None => w.writeln(&format!("py::class_<{}> {}(m, \"{}\");", wrapper, handle, ty.name)),
            }
            w.writeln(&format!("{}.def(\"__bool__\", []({} t){{return (BOOL)t.id;}});", handle, wrapper));

            let mut lines = Vec::new();
            if let Some(init) = &ty.init {
                lines.push(format!(".def(py::init<{}>())", init));
            }
            if let Some(bucket) = buckets.remove(&ty.name) {
                lines.extend(self.registration_block(bucket, &mut failed));
            }
            self.write_block(&mut w, &handle, &lines);
        }

        for ty in &empty_types {
            let handle = format!("py_{}", ty);
            w.writeln(&format!("py::class_<{}> {}(m, \"{}\");", wrapper_name(ty), handle, ty));
            let lines = match buckets.remove(ty) {
                Some(bucket) => self.registration_block(bucket, &mut failed),
                None => Vec::new(),
            };
            self.write_block(&mut w, &handle, &lines);
        }

        w.indent -= 1;
        w.writeln("}");

        if !failed.is_empty() {
            tracing::info!(count = failed.len(), "declarations need manual wrapping");
        }

        NativesOutput {
            types_header: self.wrapper_types(&empty_types),
            registrations: w.finish(),
            failed,
        }
    }

    fn write_block(&self, w: &mut CodeWriter, handle: &str, lines: &[String]) {
        w.writeln(handle);
        w.indent += 1;
        for line in lines {
            w.writeln(line);
        }
        w.indent -= 1;
        w.writeln(";");
        w.writeln(&format!("custom({});", handle));
    }

    /// Registration entries for one type: properties, unpaired setters,
    /// methods, then statics, each group sorted by exposed name.
    ///
    /// An unmappable declaration is recorded in `failed` and left out; the
    /// rest of the block is still produced. If a property's getter fails,
    /// its setter is emitted as a plain setter instead.
    fn registration_block(&self, bucket: TypeBucket, failed: &mut Vec<String>) -> Vec<String> {
        let ty = bucket.type_name.clone();
        let groups = bucket.into_groups();
        let mut lines = Vec::new();
        let mut setters = groups.setters;

        for prop in groups.properties {
            let getter = match self.wrap(&prop.getter, &ty) {
                Ok(getter) => getter,
                Err(failure) => {
                    record(&prop.getter, failure, failed);
                    setters.extend(prop.setter);
                    continue;
                }
            };
            let setter = match prop.setter {
                Some(setter) => match self.wrap(&setter, &ty) {
                    Ok(wrapper) => Some(wrapper),
                    Err(failure) => {
                        record(&setter, failure, failed);
                        None
                    }
                },
                None => None,
            };
            match setter {
                Some(setter) => {
                    lines.push(format!(".def_property(\"{}\", {}, {})", prop.name, getter, setter));
                }
                None => {
                    lines.push(format!(".def_property_readonly(\"{}\", {})", prop.name, getter));
                }
            }
        }

        setters.sort_by(|a, b| a.exposed_name.cmp(&b.exposed_name));
        let groups = [
            (setters, ".def(\"set_"),
            (groups.methods, ".def(\""),
            (groups.statics, ".def_static(\""),
        ];
        for (members, opener) in groups {
            for member in members {
                match self.wrap(&member, &ty) {
                    Ok(wrapper) => {
                        lines.push(format!("{}{}\", {})", opener, member.exposed_name, wrapper));
                    }
                    Err(failure) => record(&member, failure, failed),
                }
            }
        }

        lines
    }

    /// Translation lambda for one member. Bound members take the owning
    /// wrapper as first argument unless the native declares a pointer there.
    fn wrap(&self, member: &ClassifiedMember, ty: &str) -> Result<String, MappingFailure> {
        let decl = &member.decl;

        let mut params = Vec::with_capacity(decl.params.len());
        for (index, param) in decl.params.iter().enumerate() {
            let forced = index == 0 && member.is_bound() && !param.is_pointer();
            let param_ty = if forced { ty } else { param.ty.as_str() };
            params.push(self.mapper.param(index, param_ty, &param.name)?);
        }
        let ret = self.mapper.ret(&decl.return_type)?;

        let decls: Vec<_> = params.iter().map(|p| p.decl.as_str()).collect();
        let args: Vec<_> = params.iter().map(|p| p.arg.as_str()).collect();
        Ok(format!(
            "[]({}) -> {} {{ return {}({}); }}",
            decls.join(","),
            ret,
            decl.qualified_name(),
            args.join(",")
        ))
    }
}

fn record(member: &ClassifiedMember, failure: MappingFailure, failed: &mut Vec<String>) {
    let qualified = member.decl.qualified_name();
    tracing::debug!(native = %qualified, %failure, "cannot map declaration");
    failed.push(qualified);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use nativegen_common::Span;
    use nativegen_config::{GeneratorConfig, OverrideSet};
    use nativegen_ir::{Declaration, Parameter};

    fn decl(namespace: &str, ret: &str, name: &str, params: &[(&str, &str)]) -> Declaration {
        Declaration {
            namespace: namespace.to_string(),
            return_type: ret.to_string(),
            name: name.to_string(),
            params: params.iter().map(|(t, n)| Parameter::new(*t, *n)).collect(),
            span: Span::default(),
        }
    }

    fn render(decls: &[Declaration]) -> NativesOutput {
        let config = GeneratorConfig::default();
        let registry = config.registry().unwrap();
        let overrides = OverrideSet::new();
        let classification = Classifier::new(&registry, &overrides, &config.classify).classify(decls);
        Emitter::new(&registry, &config.mapping).natives(classification)
    }

    fn ped_block(out: &NativesOutput) -> Vec<&str> {
        out.registrations
            .lines()
            .skip_while(|l| *l != "\tpy_Ped")
            .skip(1)
            .take_while(|l| *l != "\t;")
            .map(str::trim)
            .collect()
    }

    #[test]
    fn test_property_merge_and_group_order() {
        let decls = [
            decl("PED", "void", "SET_PED_ARMOUR", &[("Ped", "ped"), ("int", "amount")]),
            decl("PED", "void", "SET_PED_HEALTH", &[("Ped", "ped"), ("int", "value")]),
            decl("PED", "int", "GET_PED_HEALTH", &[("Ped", "ped")]),
            decl("PED", "BOOL", "IS_PED_DEAD", &[("Ped", "ped")]),
            decl("PED", "void", "EXPLODE_PED_HEAD", &[("Ped", "ped"), ("Hash", "weapon")]),
            decl("PED", "Ped", "CREATE_RANDOM_PED", &[("float", "x"), ("float", "y"), ("float", "z")]),
        ];
        let out = render(&decls);
        assert!(out.failed.is_empty());

        let expected = vec![
            ".def_property(\"health\", [](Py_Ped ped) -> int { return PED::GET_PED_HEALTH(ped.id); }, [](Py_Ped ped,int value) -> void { return PED::SET_PED_HEALTH(ped.id,value); })",
            ".def_property_readonly(\"is_dead\", [](Py_Ped ped) -> BOOL { return PED::IS_PED_DEAD(ped.id); })",
            ".def(\"set_armour\", [](Py_Ped ped,int amount) -> void { return PED::SET_PED_ARMOUR(ped.id,amount); })",
            ".def(\"explode_head\", [](Py_Ped ped,Py_Hash weapon) -> void { return PED::EXPLODE_PED_HEAD(ped.id,weapon.id); })",
            ".def_static(\"create_random_ped\", [](float x,float y,float z) -> Py_Ped { return PED::CREATE_RANDOM_PED(x,y,z); })",
        ];
        assert_eq!(ped_block(&out), expected);
        assert!(!out.registrations.contains("\"set_health\""));
    }

    #[test]
    fn test_unmappable_declarations_are_isolated() {
        let decls = [
            decl("PED", "Vector3*", "GET_PED_BONE_PTR", &[("Ped", "ped")]),
            decl("PED", "void", "SET_PED_BONE_PTR", &[("Ped", "ped"), ("int", "bone")]),
            decl("PED", "void", "APPLY_PED_DATA", &[("Ped", "ped"), ("Any*", "data")]),
            decl("PED", "int", "GET_PED_TYPE", &[("Ped", "ped")]),
        ];
        let out = render(&decls);
        assert_eq!(out.failed, vec!["PED::GET_PED_BONE_PTR", "PED::APPLY_PED_DATA"]);
        let block = ped_block(&out);
        assert_eq!(block.len(), 2);
        assert!(block[0].starts_with(".def_property_readonly(\"type\""));
        assert!(block[1].starts_with(".def(\"set_bone_ptr\""));
        assert!(!out.registrations.contains("APPLY_PED_DATA"));
    }

    #[test]
    fn test_unmappable_setter_leaves_readonly_property() {
        let decls = [
            decl("PED", "int", "GET_PED_ARMOUR", &[("Ped", "ped")]),
            decl("PED", "void", "SET_PED_ARMOUR", &[("Ped", "ped"), ("int*", "amount")]),
        ];
        let out = render(&decls);
        assert_eq!(out.failed, vec!["PED::SET_PED_ARMOUR"]);
        assert_eq!(
            ped_block(&out),
            vec![".def_property_readonly(\"armour\", [](Py_Ped ped) -> int { return PED::GET_PED_ARMOUR(ped.id); })"]
        );
    }

    #[test]
    fn test_namespaces_of_one_type_share_a_block() {
        let decls = [
            decl("Ped", "void", "SET_PED_ARMOUR", &[("Ped", "ped"), ("int", "amount")]),
            decl("PED", "void", "CLEAR_PED_TASKS", &[("Ped", "ped")]),
            decl("PED", "int", "GET_PED_ARMOUR", &[("Ped", "ped")]),
            decl("Ped", "void", "APPLY_DAMAGE_TO_PED", &[("Ped", "ped"), ("int", "damage")]),
        ];
        let out = render(&decls);
        assert!(out.failed.is_empty());
        assert_eq!(out.registrations.matches("\tpy_Ped\n").count(), 1);
        assert_eq!(
            ped_block(&out),
            vec![
                ".def_property(\"armour\", [](Py_Ped ped) -> int { return PED::GET_PED_ARMOUR(ped.id); }, [](Py_Ped ped,int amount) -> void { return Ped::SET_PED_ARMOUR(ped.id,amount); })",
                ".def(\"apply_damage_to_ped\", [](Py_Ped ped,int damage) -> void { return Ped::APPLY_DAMAGE_TO_PED(ped.id,damage); })",
                ".def(\"clear_tasks\", [](Py_Ped ped) -> void { return PED::CLEAR_PED_TASKS(ped.id); })",
            ]
        );
    }

    #[test]
    fn test_pointer_first_param_is_not_forced() {
        let decls = [decl("ENTITY", "void", "DELETE_ENTITY", &[("Entity*", "entity")])];
        let out = render(&decls);
        assert_eq!(out.failed, vec!["ENTITY::DELETE_ENTITY"]);
    }

    #[test]
    fn test_empty_types_and_hooks() {
        let decls = [
            decl("MISC", "int", "GET_GAME_TIMER", &[]),
            decl("AUDIO", "void", "_0xDEADBEEF", &[]),
        ];
        let out = render(&decls);

        assert!(out.types_header.ends_with("struct Py_Audio{};\nstruct Py_Misc{};\n"));
        assert!(out.registrations.contains(
            "\tpy::class_<Py_Misc> py_Misc(m, \"Misc\");\n\tpy_Misc\n\t\t.def_static(\"get_game_timer\", []() -> int { return MISC::GET_GAME_TIMER(); })\n"
        ));
        assert!(out.registrations.contains("void custom(py::class_<Py_Audio>);\n"));
        assert!(out.registrations.contains("\tpy::class_<Py_Pickup> py_Pickup(m, \"Pickup\",py_Object);\n"));
        assert!(out.registrations.contains("\tpy_Hash\n\t\t.def(py::init<DWORD>())\n\t;\n\tcustom(py_Hash);\n"));

        let hook_order: Vec<_> = out
            .registrations
            .lines()
            .filter(|l| l.starts_with("void custom("))
            .collect();
        let mut sorted = hook_order.clone();
        sorted.sort();
        assert_eq!(hook_order, sorted);
        assert_eq!(hook_order.len(), 15);
    }

    #[test]
    fn test_render_is_deterministic() {
        let decls = [
            decl("PLAYER", "Ped", "GET_PLAYER_PED", &[("Player", "player")]),
            decl("PLAYER", "void", "SET_PLAYER_MODEL", &[("Player", "player"), ("Hash", "model")]),
            decl("GAMEPLAY", "void", "SET_TIME_SCALE", &[("float", "scale")]),
        ];
        let mut reversed = decls.to_vec();
        reversed.reverse();
        assert_eq!(render(&decls), render(&decls));
        assert_eq!(render(&decls), render(&reversed));
    }
}
