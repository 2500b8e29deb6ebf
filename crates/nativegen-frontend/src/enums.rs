//! Enumeration harvesting.

use crate::scanner::{split_top_level, Scanner};
use crate::Parsed;
use nativegen_common::{camel_to_snake, Diagnostic, Span};
use nativegen_ir::{EnumDescriptor, EnumeratorEntry};

/// Extract every `enum NAME [: underlying] { ... };` block from
/// comment-free text, including blocks nested in namespaces, structs and
/// `extern "C"` sections.
pub fn harvest_enums(text: &str) -> Parsed<EnumDescriptor> {
    let mut parsed = Parsed::default();
    let mut scanner = Scanner::new(text);

    while let Some(start) = scanner.next_word("enum") {
        scanner.skip_ws();
        let mut name = scanner.ident();
        if matches!(name, Some(("class" | "struct", _))) {
            scanner.skip_ws();
            name = scanner.ident();
        }
        let Some((name, name_span)) = name else {
            parsed.diagnostics.push(
                Diagnostic::warning("enum without a name")
                    .with_span(Span::new(start, scanner.pos()))
                    .with_label("skipped"),
            );
            continue;
        };

        match scanner.find_any(&['{', ';']) {
            Some(('{', _)) => {}
            Some(_) => {
                tracing::debug!(name, "skipping enum forward declaration");
                continue;
            }
            None => {
                parsed.diagnostics.push(
                    Diagnostic::warning(format!("enum `{}` has no body", name))
                        .with_span(name_span)
                        .with_label("declared here"),
                );
                continue;
            }
        }

        let body_pos = scanner.pos();
        let (open, close) = match scanner.block('{', '}') {
            Ok(range) => range,
            Err(err) => {
                parsed.diagnostics.push(
                    Diagnostic::warning(format!("enum `{}` is malformed: {}", name, err))
                        .with_span(Span::new(err.offset(), err.offset() + 1))
                        .with_label("block starts here")
                        .with_help("the block was skipped; check for unmatched braces"),
                );
                scanner.set_pos(body_pos + 1);
                continue;
            }
        };
        scanner.skip_ws();
        scanner.eat(';');

        let entries = split_top_level(&text[open + 1..close], ',')
            .into_iter()
            .filter_map(|entry| parse_entry(name, entry))
            .collect();

        parsed.items.push(EnumDescriptor {
            name: name.to_string(),
            entries,
            span: Span::new(start, scanner.pos()),
        });
    }

    parsed
}

fn parse_entry(enum_name: &str, entry: &str) -> Option<EnumeratorEntry> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }
    let (ident, has_explicit_value) = match entry.split_once('=') {
        Some((ident, _)) => (ident.trim(), true),
        None => (entry, false),
    };
    Some(EnumeratorEntry {
        ident: ident.to_string(),
        has_explicit_value,
        exposed_name: exposed_enum_name(enum_name, ident),
    })
}

/// Binding name for an enumerator: the enum's own name removed from the
/// front, then lowercase underscore form.
///
/// The leading name is matched both verbatim (`VehicleClassSedan`) and in
/// underscore form (`VEHICLE_CLASS_SEDAN`). If nothing would remain, the
/// whole identifier is used.
pub fn exposed_enum_name(enum_name: &str, ident: &str) -> String {
    let stripped = ident.strip_prefix(enum_name).unwrap_or(ident);
    let snake = camel_to_snake(stripped);
    let prefix = format!("{}_", camel_to_snake(enum_name));
    let snake = snake.strip_prefix(&prefix).unwrap_or(&snake);
    let snake = snake.trim_start_matches('_');
    if snake.is_empty() {
        camel_to_snake(ident)
    } else {
        snake.to_string()
    }
}
