//! Molecules - the vertices of a correlation graph

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{Interner, MoleculeId};

/// A measured entity
///
/// Equality and hashing use the interned id only. Two `Molecule` values
/// built from the same identifier string compare equal even if their
/// attribute maps differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Molecule {
    pub id: MoleculeId,
    pub name: String,
    /// Free-form attributes carried through from the loader (formula, class, ...)
    pub attributes: BTreeMap<String, String>,
}

impl Molecule {
    /// Intern `name` and build a molecule without attributes
    pub fn new(interner: &mut Interner, name: &str) -> Self {
        Self {
            id: interner.intern(name),
            name: name.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Molecule {}

impl Hash for Molecule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_id() {
        let mut interner = Interner::new();
        let a = Molecule::new(&mut interner, "pyruvate").with_attribute("class", "acid");
        let b = Molecule::new(&mut interner, "pyruvate");
        let c = Molecule::new(&mut interner, "alanine");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Molecule> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_attributes() {
        let mut interner = Interner::new();
        let m = Molecule::new(&mut interner, "urea").with_attribute("formula", "CH4N2O");
        assert_eq!(m.attribute("formula"), Some("CH4N2O"));
        assert_eq!(m.attribute("mass"), None);
    }
}
