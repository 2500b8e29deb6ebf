//! Classification of declarations into per-type buckets.

use crate::rules::{classify_shape, FilterRules, Shape, Verdict};
use indexmap::IndexMap;
use nativegen_config::{ClassifyConfig, OverrideSet, TypeRegistry};
use nativegen_ir::{ClassifiedMember, Declaration, MemberKind, SkipReason, TypeBucket};
use std::collections::BTreeMap;

/// Buckets keyed by logical type name, plus everything filtered out.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub buckets: BTreeMap<String, TypeBucket>,
    /// Qualified names dropped before emission, in source order.
    pub skipped: Vec<(String, SkipReason)>,
}

pub struct Classifier<'a> {
    registry: &'a TypeRegistry,
    overrides: &'a OverrideSet,
    filters: FilterRules,
}

/// Lowercase function name with one leading underscore removed and every
/// `type_` segment dropped: `IS_PED_ARMED` in `Ped` gives `is_armed`.
pub fn short_name(function: &str, type_name: &str) -> String {
    let lower = function.to_lowercase();
    let lower = lower.strip_prefix('_').unwrap_or(&lower);
    let token = format!("{}_", type_name.to_lowercase());

    let mut out = String::with_capacity(lower.len());
    let mut rest = lower;
    loop {
        if let Some(stripped) = rest.strip_prefix(token.as_str()) {
            rest = stripped;
            continue;
        }
        match rest.find('_') {
            Some(i) => {
                out.push_str(&rest[..=i]);
                rest = &rest[i + 1..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }

    if out.trim_matches('_').is_empty() {
        lower.to_string()
    } else {
        out
    }
}

impl<'a> Classifier<'a> {
    pub fn new(registry: &'a TypeRegistry, overrides: &'a OverrideSet, config: &ClassifyConfig) -> Self {
        Self {
            registry,
            overrides,
            filters: FilterRules::from_config(config),
        }
    }

    /// Whether the first parameter is the namespace's own, registered type.
    fn is_member(&self, decl: &Declaration, type_name: &str) -> bool {
        let Some(first) = decl.params.first() else {
            return false;
        };
        (first.ty == type_name || first.name == type_name.to_lowercase()) && self.registry.contains(type_name)
    }

    /// Classify one declaration, or give the reason it is left out.
    pub fn classify_one(&self, decl: &Declaration) -> Result<ClassifiedMember, SkipReason> {
        if let Verdict::Skip(reason) = self.filters.evaluate(decl, self.overrides) {
            return Err(reason);
        }

        let type_name = decl.type_name();
        let short = short_name(&decl.name, &type_name);
        let (kind, exposed_name) = classify_shape(&Shape {
            is_member: self.is_member(decl, &type_name),
            arity: decl.params.len(),
            short_name: &short,
        });

        Ok(ClassifiedMember {
            kind,
            exposed_name,
            decl: decl.clone(),
        })
    }

    /// Classify all declarations. Every namespace gets a bucket, even if
    /// all of its declarations were filtered out.
    pub fn classify(&self, decls: &[Declaration]) -> Classification {
        let mut result = Classification::default();
        let mut stats: IndexMap<&str, [usize; 4]> = IndexMap::new();

        for decl in decls {
            let type_name = decl.type_name();
            let bucket = result
                .buckets
                .entry(type_name.clone())
                .or_insert_with(|| TypeBucket::new(type_name.clone()));
            let counts = stats.entry(decl.namespace.as_str()).or_default();

            match self.classify_one(decl) {
                Ok(member) => {
                    tracing::debug!(
                        native = %decl.qualified_name(),
                        kind = %member.kind,
                        name = %member.exposed_name,
                        "classified"
                    );
                    counts[member.kind as usize] += 1;
                    let by = decl.qualified_name();
                    if let Some(old) = bucket.insert(member) {
                        let old_name = old.decl.qualified_name();
                        tracing::warn!(native = %old_name, by = %by, "declaration shadowed by a later one");
                        counts[old.kind as usize] -= 1;
                        result.skipped.push((old_name, SkipReason::Shadowed { by }));
                    }
                }
                Err(reason) => {
                    let qualified = decl.qualified_name();
                    tracing::debug!(native = %qualified, %reason, "skipped");
                    result.skipped.push((qualified, reason));
                }
            }
        }

        for (namespace, counts) in &stats {
            tracing::info!(
                namespace,
                statics = counts[MemberKind::Static as usize],
                methods = counts[MemberKind::Method as usize],
                getters = counts[MemberKind::Getter as usize],
                setters = counts[MemberKind::Setter as usize],
                "classified namespace"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativegen_common::Span;
    use nativegen_config::GeneratorConfig;
    use nativegen_ir::Parameter;

    fn decl(namespace: &str, ret: &str, name: &str, params: &[(&str, &str)]) -> Declaration {
        Declaration {
            namespace: namespace.to_string(),
            return_type: ret.to_string(),
            name: name.to_string(),
            params: params.iter().map(|(t, n)| Parameter::new(*t, *n)).collect(),
            span: Span::default(),
        }
    }

    fn classify(decls: &[Declaration], overrides: &OverrideSet) -> Classification {
        let config = GeneratorConfig::default();
        let registry = config.registry().unwrap();
        Classifier::new(&registry, overrides, &config.classify).classify(decls)
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("IS_PED_ARMED", "Ped"), "is_armed");
        assert_eq!(short_name("_GET_PED_HEALTH", "Ped"), "get_health");
        assert_eq!(short_name("PED_SKIP_NEXT", "Ped"), "skip_next");
        assert_eq!(short_name("SET_SPEED_PED_X", "Ped"), "set_speed_x");
        assert_eq!(short_name("GET_GAME_TIMER", "Misc"), "get_game_timer");
        assert_eq!(short_name("PED_", "Ped"), "ped_");
        assert_eq!(short_name("IsPedArmed", "Ped"), "ispedarmed");
    }

    #[test]
    fn test_single_param_is_getter() {
        let decls = [decl("PED", "BOOL", "IS_PED_ARMED", &[("Ped", "ped")])];
        let result = classify(&decls, &OverrideSet::new());
        let bucket = &result.buckets["Ped"];
        assert_eq!(bucket.members().filter(|m| m.kind == MemberKind::Getter).count(), 1);
        let member = bucket.members().next().unwrap();
        assert_eq!(member.exposed_name, "is_armed");
    }

    #[test]
    fn test_member_by_param_name() {
        let decls = [decl("VEHICLE", "void", "EXPLODE_VEHICLE", &[("int", "vehicle"), ("BOOL", "audible")])];
        let result = classify(&decls, &OverrideSet::new());
        let member = result.buckets["Vehicle"].members().next().unwrap();
        assert_eq!(member.kind, MemberKind::Method);
        assert_eq!(member.exposed_name, "explode_vehicle");
    }

    #[test]
    fn test_unregistered_namespace_is_static() {
        let decls = [decl("MISC", "int", "GET_GAME_TIMER", &[]), decl("MISC", "void", "SET_MISC_FLAG", &[("Misc", "misc"), ("BOOL", "b")])];
        let result = classify(&decls, &OverrideSet::new());
        let bucket = &result.buckets["Misc"];
        assert_eq!(bucket.members().filter(|m| m.kind == MemberKind::Static).count(), 2);
        let names: Vec<_> = bucket.members().map(|m| m.exposed_name.as_str()).collect();
        assert_eq!(names, vec!["get_game_timer", "set_flag"]);
    }

    #[test]
    fn test_overrides_and_hex_are_skipped() {
        let decls = [
            decl("PED", "Ped", "CREATE_PED", &[("int", "type")]),
            decl("PED", "void", "_0x9A1F2C3B", &[("Ped", "ped")]),
            decl("AUDIO", "void", "PLAY_SOUND", &[]),
        ];
        let overrides: OverrideSet = ["PED::CREATE_PED"].into_iter().collect();
        let result = classify(&decls, &overrides);

        assert_eq!(
            result.skipped,
            vec![
                ("PED::CREATE_PED".to_string(), SkipReason::Override),
                ("PED::_0x9A1F2C3B".to_string(), SkipReason::HexName),
            ]
        );
        assert!(result.buckets["Ped"].is_empty());
        let types: Vec<_> = result.buckets.keys().map(String::as_str).collect();
        assert_eq!(types, vec!["Audio", "Ped"]);
    }

    #[test]
    fn test_later_declaration_shadows() {
        let decls = [
            decl("PED", "int", "GET_PED_HEALTH", &[("Ped", "ped")]),
            decl("PED", "int", "_GET_PED_HEALTH", &[("Ped", "ped")]),
        ];
        let result = classify(&decls, &OverrideSet::new());
        assert_eq!(result.buckets["Ped"].len(), 1);
        assert_eq!(
            result.skipped,
            vec![(
                "PED::GET_PED_HEALTH".to_string(),
                SkipReason::Shadowed { by: "PED::_GET_PED_HEALTH".to_string() }
            )]
        );
    }
}
