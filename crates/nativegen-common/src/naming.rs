//! Identifier case conversion shared by the enum harvester and the classifier.

use regex::Regex;
use std::sync::LazyLock;

static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Convert camel-case or upper-snake text to lowercase underscore form.
///
/// `VehicleClassSedan` -> `vehicle_class_sedan`,
/// `VEHICLE_CLASS_SEDAN` -> `vehicle_class_sedan`.
pub fn camel_to_snake(ident: &str) -> String {
    let split = WORD_BOUNDARY.replace_all(ident, "${1}_${2}");
    LOWER_UPPER.replace_all(&split, "${1}_${2}").to_lowercase()
}

/// Logical type name for a namespace: first character kept, rest lowercased.
///
/// `PED` -> `Ped`, `MISC` -> `Misc`.
pub fn namespace_type_name(namespace: &str) -> String {
    let mut chars = namespace.chars();
    match chars.next() {
        Some(first) => {
            let mut name = String::with_capacity(namespace.len());
            name.push(first);
            name.push_str(&chars.as_str().to_lowercase());
            name
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("VehicleClassSedan"), "vehicle_class_sedan");
        assert_eq!(camel_to_snake("VEHICLE_CLASS_COMPACT"), "vehicle_class_compact");
        assert_eq!(camel_to_snake("HTTPResponse"), "http_response");
        assert_eq!(camel_to_snake("Weapon2Hand"), "weapon2_hand");
        assert_eq!(camel_to_snake("already_snake"), "already_snake");
    }

    #[test]
    fn test_namespace_type_name() {
        assert_eq!(namespace_type_name("PED"), "Ped");
        assert_eq!(namespace_type_name("MISC"), "Misc");
        assert_eq!(namespace_type_name("SCRHANDLE"), "Scrhandle");
        assert_eq!(namespace_type_name(""), "");
    }
}
