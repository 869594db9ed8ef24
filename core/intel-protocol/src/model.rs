use rkyv::{Archive, Deserialize, Serialize};

use crate::ids::{CharacterIndex, RegionId, SystemId, TypeId};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Region {
    pub id: RegionId,
    pub name: String,
}

/// A resolved solar system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SolarSystem {
    pub id: SystemId,
    pub name: String,
    pub region: RegionId,
}

/// A resolved ship type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ShipType {
    pub id: TypeId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum CharacterStatus {
    /// Exists and has been seen recently.
    Active,
    /// Exists but has not been seen for a while.
    Inactive,
    /// Exists but has been unused for so long it is rarely the intended meaning.
    Dormant,
    NotFound,
}

impl CharacterStatus {
    pub fn exists(self) -> bool {
        !matches!(self, CharacterStatus::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct CharacterEntry {
    pub name: String,
    pub status: CharacterStatus,
}

/// The character names looked up for one line, in request order.
///
/// `CharacterIndex` values in tokens index into `entries`. Names are unique
/// case-insensitively, so the same name always maps to the same index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct CharacterBatch {
    pub entries: Vec<CharacterEntry>,
}

impl CharacterBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name with `NotFound` status unless it is already present.
    pub fn insert(&mut self, name: &str) -> CharacterIndex {
        if let Some(index) = self.index_of(name) {
            return index;
        }
        self.entries.push(CharacterEntry {
            name: name.to_string(),
            status: CharacterStatus::NotFound,
        });
        CharacterIndex(self.entries.len() - 1)
    }

    pub fn index_of(&self, name: &str) -> Option<CharacterIndex> {
        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name))
            .map(CharacterIndex)
    }

    pub fn get(&self, index: CharacterIndex) -> Option<&CharacterEntry> {
        self.entries.get(index.0)
    }

    pub fn status(&self, index: CharacterIndex) -> CharacterStatus {
        self.get(index)
            .map(|e| e.status)
            .unwrap_or(CharacterStatus::NotFound)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
