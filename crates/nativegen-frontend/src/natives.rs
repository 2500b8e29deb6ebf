//! Declaration extraction from namespace blocks.

use crate::scanner::{is_ident_char, split_top_level, ScanError, Scanner};
use crate::Parsed;
use nativegen_common::{Diagnostic, Span};
use nativegen_ir::{Declaration, Parameter};

/// Extract every `static RET NAME(PARAMS) { ... }` inside every
/// `namespace NAME { ... }` block of comment-free text, in source order.
pub fn parse_declarations(text: &str) -> Parsed<Declaration> {
    let mut parsed = Parsed::default();
    let mut scanner = Scanner::new(text);

    while let Some(start) = scanner.next_keyword("namespace") {
        scanner.skip_ws();
        let Some((name, name_span)) = scanner.ident() else {
            parsed.diagnostics.push(
                Diagnostic::warning("namespace without a name")
                    .with_span(Span::new(start, scanner.pos()))
                    .with_label("skipped"),
            );
            continue;
        };

        scanner.skip_ws();
        let body_pos = scanner.pos();
        let (open, close) = match scanner.block('{', '}') {
            Ok(range) => range,
            Err(err) => {
                parsed.diagnostics.push(block_error(&format!("namespace `{}`", name), err, name_span));
                if matches!(err, ScanError::Unterminated { .. }) {
                    scanner.set_pos(body_pos + 1);
                    scanner.resync("namespace");
                }
                continue;
            }
        };

        let before = parsed.items.len();
        parse_functions(text, name, open + 1, close, &mut parsed);
        tracing::debug!(
            namespace = name,
            declarations = parsed.items.len() - before,
            "parsed namespace"
        );
    }

    parsed
}

fn block_error(what: &str, err: ScanError, name_span: Span) -> Diagnostic {
    let message = match err {
        ScanError::Unterminated { .. } => format!("{} has an unterminated block", what),
        ScanError::Expected { expected, .. } => format!("{}: expected `{}`", what, expected),
    };
    Diagnostic::warning(message)
        .with_span(name_span)
        .with_label("skipped")
        .with_help("the block does not have the expected brace shape")
}

fn parse_functions(text: &str, namespace: &str, start: usize, end: usize, parsed: &mut Parsed<Declaration>) {
    let mut scanner = Scanner::range(text, start, end);

    while let Some(kw) = scanner.next_keyword("static") {
        let head_start = scanner.pos();
        let paren = match scanner.find_any(&['(', ';', '{', '}']) {
            Some(('(', at)) => at,
            Some((c, at)) => {
                parsed.diagnostics.push(
                    Diagnostic::warning(format!("expected a function declaration in namespace `{}`", namespace))
                        .with_span(Span::new(kw, at))
                        .with_label("not a function"),
                );
                if c != '{' || scanner.block('{', '}').is_err() {
                    scanner.set_pos(at + 1);
                }
                continue;
            }
            None => break,
        };

        let head = &text[head_start..paren];
        let Some((return_type, name)) = split_head(head) else {
            parsed.diagnostics.push(
                Diagnostic::warning(format!("malformed declaration `{}` in namespace `{}`", head.trim(), namespace))
                    .with_span(Span::new(kw, paren)),
            );
            if scanner.block('(', ')').is_err() {
                scanner.set_pos(paren + 1);
                scanner.resync("static");
            }
            continue;
        };

        let (popen, pclose) = match scanner.block('(', ')') {
            Ok(range) => range,
            Err(err) => {
                parsed.diagnostics.push(block_error(&format!("`{}::{}`", namespace, name), err, Span::new(kw, paren)));
                scanner.set_pos(paren + 1);
                scanner.resync("static");
                continue;
            }
        };

        scanner.skip_ws();
        if scanner.peek() != Some('{') {
            parsed.diagnostics.push(
                Diagnostic::warning(format!("`{}::{}` has no body", namespace, name))
                    .with_span(Span::new(kw, scanner.pos()))
                    .with_label("declaration skipped"),
            );
            continue;
        }
        let body_pos = scanner.pos();
        if let Err(err) = scanner.block('{', '}') {
            parsed.diagnostics.push(block_error(&format!("`{}::{}`", namespace, name), err, Span::new(kw, paren)));
            scanner.set_pos(body_pos + 1);
            scanner.resync("static");
            continue;
        }

        parsed.items.push(Declaration {
            namespace: namespace.to_string(),
            return_type,
            name: name.to_string(),
            params: parse_params(&text[popen + 1..pclose]),
            span: Span::new(kw, scanner.pos()),
        });
    }
}

/// Split `RETURN_TYPE NAME` on the trailing identifier.
fn split_head(head: &str) -> Option<(String, &str)> {
    let head = head.trim();
    let split = head.rfind(|c: char| !is_ident_char(c)).map_or(0, |i| i + 1);
    let (ret, name) = head.split_at(split);
    let ret = normalize_type(ret);
    if ret.is_empty() || name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some((ret, name))
}

/// Collapse whitespace and attach pointer/reference markers to the type:
/// `const  char *` -> `const char*`.
fn normalize_type(ty: &str) -> String {
    ty.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" *", "*")
        .replace(" &", "&")
}

fn parse_params(list: &str) -> Vec<Parameter> {
    if list.trim() == "void" {
        return Vec::new();
    }

    split_top_level(list, ',')
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(index, param)| match param.rsplit_once(char::is_whitespace) {
            Some((ty, name)) => {
                let bare = name.trim_start_matches(['*', '&']);
                let markers = &name[..name.len() - bare.len()];
                Parameter::new(normalize_type(&format!("{}{}", ty, markers)), bare)
            }
            None => Parameter::new(normalize_type(param), format!("p{}", index)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NATIVES: &str = r#"
#pragma once

namespace PLAYER
{
	static Ped GET_PLAYER_PED(Player player) { return invoke<Ped>(0x43A66C31C68491C0, player); }
	static void SET_PLAYER_MODEL(Player player, Hash model) { invoke<Void>(0x00A1CADD00108836, player, model); }
}

namespace PED
{
	static BOOL IS_PED_ARMED(Ped ped, int p1) { return invoke<BOOL>(0x475768A975D5AD17, ped, p1); }
	static Any* _0xB8B52E498014F5B0(char *name) { if (name) { return 0; } return invoke<Any*>(0xB8B52E498014F5B0, name); }
}
"#;

    #[test]
    fn test_parse_namespaces_in_order() {
        let parsed = parse_declarations(NATIVES);
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        let names: Vec<_> = parsed.items.iter().map(|d| d.qualified_name()).collect();
        assert_eq!(
            names,
            vec![
                "PLAYER::GET_PLAYER_PED",
                "PLAYER::SET_PLAYER_MODEL",
                "PED::IS_PED_ARMED",
                "PED::_0xB8B52E498014F5B0",
            ]
        );
    }

    #[test]
    fn test_signature_parts() {
        let parsed = parse_declarations(NATIVES);
        let set_model = &parsed.items[1];
        assert_eq!(set_model.return_type, "void");
        assert_eq!(
            set_model.params,
            vec![Parameter::new("Player", "player"), Parameter::new("Hash", "model")]
        );

        let hex = &parsed.items[3];
        assert_eq!(hex.return_type, "Any*");
        assert_eq!(hex.params, vec![Parameter::new("char*", "name")]);
    }

    #[test]
    fn test_param_edge_cases() {
        assert_eq!(parse_params(""), vec![]);
        assert_eq!(parse_params(" void "), vec![]);
        assert_eq!(
            parse_params("const char * text, float, int  &count"),
            vec![
                Parameter::new("const char*", "text"),
                Parameter::new("float", "p1"),
                Parameter::new("int&", "count"),
            ]
        );
    }

    #[test]
    fn test_missing_body_is_skipped() {
        let text = "namespace CAM { static Cam GET_RENDERING_CAM(); static void RENDER() { invoke<Void>(0x1); } }";
        let parsed = parse_declarations(text);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("GET_RENDERING_CAM"));
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].name, "RENDER");
    }

    #[test]
    fn test_unterminated_namespace_does_not_stop_scan() {
        let text = "namespace BROKEN { static void A() { \nnamespace OK { static int B() { return 1; } }";
        let parsed = parse_declarations(text);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("BROKEN"));
        let names: Vec<_> = parsed.items.iter().map(|d| d.qualified_name()).collect();
        assert_eq!(names, vec!["OK::B"]);
    }

    #[test]
    fn test_unterminated_params_resume_at_next_static() {
        let text = "namespace A { static int F(int x { return 0; } static int G() { return 1; } }";
        let parsed = parse_declarations(text);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("A::F"));
        let names: Vec<_> = parsed.items.iter().map(|d| d.qualified_name()).collect();
        assert_eq!(names, vec!["A::G"]);
    }

    #[test]
    fn test_malformed_head_resumes_at_next_static() {
        let text = "namespace A { static 9(int x { } static void H() { invoke<Void>(0x1); } }";
        let parsed = parse_declarations(text);
        assert_eq!(parsed.diagnostics.len(), 1);
        let names: Vec<_> = parsed.items.iter().map(|d| d.qualified_name()).collect();
        assert_eq!(names, vec!["A::H"]);
    }

    #[test]
    fn test_namespace_without_block() {
        let parsed = parse_declarations("using namespace std; namespace A { static int F() { return 0; } }");
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].namespace, "A");
    }

    #[test]
    fn test_non_function_static_is_reported() {
        let parsed = parse_declarations("namespace A { static int counter; static int F() { return 0; } }");
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.items.len(), 1);
    }
}
