//! Identifier interning
//!
//! Molecules are frequently re-looked-up from parsed text. Rather than
//! comparing strings or pointers, the data loader owns one [`Interner`] and
//! hands out [`MoleculeId`]s; everything downstream compares ids.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque index of an interned molecule identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoleculeId(u32);

impl MoleculeId {
    /// Build an id from its raw index
    ///
    /// Only meaningful for ids handed out by the same [`Interner`].
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MoleculeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owned table mapping identifier strings to [`MoleculeId`]s
#[derive(Debug, Clone, Default)]
pub struct Interner {
    ids: HashMap<String, MoleculeId>,
    names: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, allocating one on first sight
    pub fn intern(&mut self, name: &str) -> MoleculeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = MoleculeId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up an existing id without allocating
    pub fn get(&self, name: &str) -> Option<MoleculeId> {
        self.ids.get(name).copied()
    }

    /// The identifier string behind an id
    pub fn resolve(&self, id: MoleculeId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
