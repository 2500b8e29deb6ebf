//! The fixed table of logical wrapper types.

use crate::config::TypeEntry;
use crate::error::ConfigError;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// A known logical type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub storage: String,
    pub parent: Option<String>,
    pub init: Option<String>,
}

/// Ordered, validated type table.
///
/// Every parent reference resolves to another entry and no parent chain
/// loops. Parents are listed before their children; otherwise entries keep
/// the order they were given in. The table is built once and only read
/// afterwards.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new(entries: impl IntoIterator<Item = TypeEntry>) -> crate::Result<Self> {
        let mut types = IndexMap::new();
        for entry in entries {
            if types.contains_key(&entry.name) {
                return Err(ConfigError::DuplicateType(entry.name));
            }
            types.insert(
                entry.name.clone(),
                TypeDescriptor {
                    name: entry.name,
                    storage: entry.storage,
                    parent: entry.parent,
                    init: entry.init,
                },
            );
        }

        let registry = Self { types };
        registry.validate()?;
        Ok(registry.parents_first())
    }

    /// Reorder so that every entry follows its whole parent chain. Requires
    /// a validated table.
    fn parents_first(self) -> Self {
        let mut ordered = IndexMap::with_capacity(self.types.len());
        for ty in self.types.values() {
            let mut chain = vec![ty];
            while let Some(parent) = chain.last().and_then(|t| self.parent_of(&t.name)) {
                chain.push(parent);
            }
            for ty in chain.into_iter().rev() {
                if !ordered.contains_key(&ty.name) {
                    ordered.insert(ty.name.clone(), ty.clone());
                }
            }
        }
        Self { types: ordered }
    }

    fn validate(&self) -> crate::Result<()> {
        for ty in self.types.values() {
            let Some(parent) = &ty.parent else { continue };
            if !self.types.contains_key(parent) {
                return Err(ConfigError::UnknownParent {
                    ty: ty.name.clone(),
                    parent: parent.clone(),
                });
            }
        }

        for ty in self.types.values() {
            let mut seen = FxHashSet::default();
            let mut chain = vec![ty.name.as_str()];
            let mut current = ty;
            seen.insert(current.name.as_str());
            while let Some(parent) = current.parent.as_deref() {
                chain.push(parent);
                if !seen.insert(parent) {
                    return Err(ConfigError::ParentCycle {
                        chain: chain.join(" -> "),
                    });
                }
                current = &self.types[parent];
            }
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn parent_of(&self, name: &str) -> Option<&TypeDescriptor> {
        self.get(name)?.parent.as_deref().and_then(|p| self.get(p))
    }

    /// Registered types, parents first.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Names from `candidates` that have no registry entry, sorted and
    /// deduplicated.
    pub fn empty_types<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut empty: Vec<String> = candidates
            .into_iter()
            .filter(|name| !self.contains(name))
            .map(String::from)
            .collect();
        empty.sort();
        empty.dedup();
        empty
    }
}
