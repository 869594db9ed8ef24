//! Contracts of the reference collaborators consulted while tokenizing.
//!
//! Implementations handle their own failures and answer "no match" instead of
//! erroring; the tokenizer never distinguishes the two.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::ids::SystemId;
use crate::model::{CharacterStatus, Region, ShipType, SolarSystem};

pub trait SystemLookup: Send + Sync {
    /// Fuzzy system lookup restricted to the named regions (all regions when empty).
    fn lookup_system(&self, text: &str, regions: &[String]) -> Option<SolarSystem>;

    fn region_of(&self, system: SystemId) -> Option<Region>;
}

pub trait ShipLookup: Send + Sync {
    /// Fuzzy ship lookup. Case matters for some aliases.
    fn lookup_ship(&self, text: &str) -> Option<ShipType>;
}

pub trait WordLookup: Send + Sync {
    fn is_dictionary_word(&self, word: &str) -> bool;

    fn is_type_name(&self, text: &str) -> bool;
}

/// The synchronous catalogs, bundled.
pub trait ReferenceData: SystemLookup + ShipLookup + WordLookup {}

impl<T: SystemLookup + ShipLookup + WordLookup> ReferenceData for T {}

#[async_trait]
pub trait CharacterLookup: Send + Sync {
    /// Resolves all candidate names of one line in a single call.
    ///
    /// Names absent from the returned map were not found.
    async fn lookup_character_statuses(
        &self,
        originator: Option<&str>,
        names: &[String],
    ) -> BTreeMap<String, CharacterStatus>;
}
