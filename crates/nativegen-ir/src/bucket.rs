use crate::member::{ClassifiedMember, MemberKind};
use std::collections::BTreeMap;

/// Classified members destined for one logical type.
///
/// Each kind is keyed by exposed name, so iteration is always in
/// lexicographic order regardless of the order declarations arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBucket {
    pub type_name: String,
    getters: BTreeMap<String, ClassifiedMember>,
    setters: BTreeMap<String, ClassifiedMember>,
    methods: BTreeMap<String, ClassifiedMember>,
    statics: BTreeMap<String, ClassifiedMember>,
}

/// A getter merged with the setter of the same exposed name, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub getter: ClassifiedMember,
    pub setter: Option<ClassifiedMember>,
}

/// A bucket split into emission groups, each sorted by exposed name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberGroups {
    pub properties: Vec<Property>,
    /// Setters without a getter of the same name.
    pub setters: Vec<ClassifiedMember>,
    pub methods: Vec<ClassifiedMember>,
    pub statics: Vec<ClassifiedMember>,
}

impl TypeBucket {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Insert a member. Returns the member it replaced, if one of the same
    /// kind already had this exposed name.
    pub fn insert(&mut self, member: ClassifiedMember) -> Option<ClassifiedMember> {
        let map = match member.kind {
            MemberKind::Getter => &mut self.getters,
            MemberKind::Setter => &mut self.setters,
            MemberKind::Method => &mut self.methods,
            MemberKind::Static => &mut self.statics,
        };
        map.insert(member.exposed_name.clone(), member)
    }

    pub fn len(&self) -> usize {
        self.getters.len() + self.setters.len() + self.methods.len() + self.statics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All members in emission order.
    pub fn members(&self) -> impl Iterator<Item = &ClassifiedMember> {
        self.getters
            .values()
            .chain(self.setters.values())
            .chain(self.methods.values())
            .chain(self.statics.values())
    }

    /// Pair getters with setters and split into emission groups. A setter
    /// that joins a property is consumed and does not appear in `setters`.
    pub fn into_groups(self) -> MemberGroups {
        let mut setters = self.setters;
        let properties = self
            .getters
            .into_iter()
            .map(|(name, getter)| {
                let setter = setters.remove(&name);
                Property {
                    name,
                    getter,
                    setter,
                }
            })
            .collect();

        MemberGroups {
            properties,
            setters: setters.into_values().collect(),
            methods: self.methods.into_values().collect(),
            statics: self.statics.into_values().collect(),
        }
    }
}
