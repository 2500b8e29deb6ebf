//! Ordered rule tables used by the classifier.
//!
//! Both tables are evaluated top to bottom and the first matching rule
//! decides. Keeping them as data lets the rule set be inspected and tested
//! without running the scanner.

use nativegen_config::{ClassifyConfig, OverrideSet};
use nativegen_ir::{Declaration, MemberKind, SkipReason};

/// What a filter rule decides for a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Skip(SkipReason),
}

/// Condition tested by a filter rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePredicate {
    /// The qualified name is in the override set.
    Overridden,
    /// The lowercased function name contains this text.
    Contains(String),
    /// The function name starts with this text.
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub predicate: NamePredicate,
    pub verdict: Verdict,
}

/// Rules deciding whether a declaration is generated at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRules {
    rules: Vec<FilterRule>,
}

impl NamePredicate {
    fn matches(&self, decl: &Declaration, overrides: &OverrideSet) -> bool {
        match self {
            NamePredicate::Overridden => overrides.contains(&decl.qualified_name()),
            NamePredicate::Contains(text) => decl.name.to_lowercase().contains(text.as_str()),
            NamePredicate::Prefix(prefix) => decl.name.starts_with(prefix.as_str()),
        }
    }
}

impl FilterRules {
    /// Overrides are always dropped; hex exemptions are checked before the
    /// hex rule so they can only rescue a declaration from that rule.
    pub fn from_config(config: &ClassifyConfig) -> Self {
        let mut rules = vec![FilterRule {
            predicate: NamePredicate::Overridden,
            verdict: Verdict::Skip(SkipReason::Override),
        }];
        rules.extend(config.hex_exempt.iter().map(|text| FilterRule {
            predicate: NamePredicate::Contains(text.to_lowercase()),
            verdict: Verdict::Keep,
        }));
        rules.push(FilterRule {
            predicate: NamePredicate::Prefix(config.hex_prefix.clone()),
            verdict: Verdict::Skip(SkipReason::HexName),
        });
        Self { rules }
    }

    pub fn evaluate(&self, decl: &Declaration, overrides: &OverrideSet) -> Verdict {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(decl, overrides))
            .map_or(Verdict::Keep, |rule| rule.verdict.clone())
    }
}

/// The facts about a declaration that kind rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape<'a> {
    pub is_member: bool,
    pub arity: usize,
    pub short_name: &'a str,
}

/// One row of the naming-convention table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindRule {
    pub kind: MemberKind,
    pub requires_member: bool,
    pub arity: Option<usize>,
    /// The short name must start with one of these; empty means any name.
    pub prefixes: &'static [&'static str],
    /// Prefix removed from the short name to form the exposed name.
    pub strip: Option<&'static str>,
}

pub const KIND_RULES: &[KindRule] = &[
    KindRule {
        kind: MemberKind::Getter,
        requires_member: true,
        arity: Some(1),
        prefixes: &["get_", "is_", "are_", "can_"],
        strip: Some("get_"),
    },
    KindRule {
        kind: MemberKind::Setter,
        requires_member: true,
        arity: Some(2),
        prefixes: &["set_"],
        strip: Some("set_"),
    },
    KindRule {
        kind: MemberKind::Method,
        requires_member: true,
        arity: None,
        prefixes: &[],
        strip: None,
    },
    KindRule {
        kind: MemberKind::Static,
        requires_member: false,
        arity: None,
        prefixes: &[],
        strip: None,
    },
];

impl KindRule {
    pub fn matches(&self, shape: &Shape<'_>) -> bool {
        (!self.requires_member || shape.is_member)
            && self.arity.map_or(true, |arity| arity == shape.arity)
            && (self.prefixes.is_empty() || self.prefixes.iter().any(|p| shape.short_name.starts_with(p)))
    }

    pub fn exposed_name(&self, short_name: &str) -> String {
        self.strip
            .and_then(|prefix| short_name.strip_prefix(prefix))
            .unwrap_or(short_name)
            .to_string()
    }
}

/// Kind and exposed name from the first matching rule. The last rule
/// matches everything, so every shape gets a kind.
pub fn classify_shape(shape: &Shape<'_>) -> (MemberKind, String) {
    let rule = KIND_RULES
        .iter()
        .find(|rule| rule.matches(shape))
        .unwrap_or(&KIND_RULES[KIND_RULES.len() - 1]);
    (rule.kind, rule.exposed_name(shape.short_name))
}
