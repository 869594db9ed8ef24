pub mod archive;
pub mod data;
pub mod directory;

use std::collections::{BTreeMap, HashMap, HashSet};

use intel_morph::normalize_name;
use intel_protocol::{
    Region, RegionId, ShipLookup, ShipType, SolarSystem, SystemId, SystemLookup, WordLookup,
};
use tracing::debug;

pub use archive::{from_archive, load_archive, to_archive, CatalogError};
pub use data::{CatalogData, CharacterRecord, RegionRecord, ShipRecord, SystemRecord};
pub use directory::StaticCharacterDirectory;

/// Abbreviations shorter than this never resolve by prefix.
const MIN_PREFIX_LEN: usize = 3;

/// Indexed, read-only reference catalog.
///
/// Implements the synchronous lookups the tokenizer consults: region-scoped
/// fuzzy system lookup, ship lookup and dictionary membership.
#[derive(Debug, Default)]
pub struct Catalog {
    regions: HashMap<RegionId, Region>,
    region_ids: HashMap<String, RegionId>,
    systems: Vec<SolarSystem>,
    /// Normalized name to system indices, ordered for prefix scans.
    system_keys: BTreeMap<String, Vec<usize>>,
    system_ids: HashMap<SystemId, usize>,
    ships: Vec<ShipType>,
    ship_names: HashMap<String, usize>,
    ship_exact: HashMap<String, usize>,
    type_names: HashSet<String>,
    words: HashSet<String>,
}

impl Catalog {
    pub fn from_data(data: &CatalogData) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();

        for region in &data.regions {
            catalog.region_ids.insert(region.name.to_lowercase(), region.id);
            catalog.regions.insert(
                region.id,
                Region {
                    id: region.id,
                    name: region.name.clone(),
                },
            );
        }

        let mut systems: Vec<&SystemRecord> = data.systems.iter().collect();
        systems.sort_by_key(|s| s.id);
        for record in systems {
            if !catalog.regions.contains_key(&record.region) {
                return Err(CatalogError::UnknownRegion {
                    system: record.name.clone(),
                    region: record.region.0,
                });
            }
            let index = catalog.systems.len();
            catalog.system_ids.insert(record.id, index);
            catalog.systems.push(SolarSystem {
                id: record.id,
                name: record.name.clone(),
                region: record.region,
            });
            catalog
                .system_keys
                .entry(normalize_name(&record.name))
                .or_default()
                .push(index);
        }

        for record in &data.ships {
            let index = catalog.ships.len();
            catalog.ships.push(ShipType {
                id: record.id,
                name: record.name.clone(),
            });
            let names = std::iter::once(&record.name).chain(record.aliases.iter());
            for name in names {
                if record.case_sensitive {
                    catalog.ship_exact.insert(name.clone(), index);
                } else {
                    catalog.ship_names.insert(name.to_lowercase(), index);
                }
            }
            catalog.type_names.insert(record.name.to_lowercase());
        }

        catalog
            .type_names
            .extend(data.type_names.iter().map(|t| t.to_lowercase()));
        catalog
            .words
            .extend(data.words.iter().map(|w| w.to_lowercase()));

        debug!(
            regions = catalog.regions.len(),
            systems = catalog.systems.len(),
            ships = catalog.ships.len(),
            words = catalog.words.len(),
            "catalog indexed"
        );
        Ok(catalog)
    }

    /// Region ids for the given names; unknown names are ignored.
    fn scope(&self, regions: &[String]) -> Option<HashSet<RegionId>> {
        if regions.is_empty() {
            return None;
        }
        Some(
            regions
                .iter()
                .filter_map(|name| self.region_ids.get(&name.to_lowercase()).copied())
                .collect(),
        )
    }

    fn in_scope(scope: &Option<HashSet<RegionId>>, system: &SolarSystem) -> bool {
        scope.as_ref().map_or(true, |ids| ids.contains(&system.region))
    }

    /// Unique prefix match for nullsec-style abbreviations (`1DQ`, `D-W7`).
    fn lookup_abbreviation(&self, text: &str, scope: &Option<HashSet<RegionId>>) -> Option<&SolarSystem> {
        let looks_abbreviated = text.chars().any(|c| c.is_ascii_digit() || c == '-');
        let key = normalize_name(text);
        if !looks_abbreviated || key.chars().count() < MIN_PREFIX_LEN {
            return None;
        }
        let mut matches = self
            .system_keys
            .range(key.clone()..)
            .take_while(|(name, _)| name.starts_with(&key))
            .flat_map(|(_, indices)| indices.iter().map(|&i| &self.systems[i]))
            .filter(|s| Self::in_scope(scope, s));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

impl SystemLookup for Catalog {
    fn lookup_system(&self, text: &str, regions: &[String]) -> Option<SolarSystem> {
        let scope = self.scope(regions);
        let key = normalize_name(text);
        if key.is_empty() {
            return None;
        }
        let exact = self.system_keys.get(&key).and_then(|indices| {
            indices
                .iter()
                .map(|&i| &self.systems[i])
                .find(|s| Self::in_scope(&scope, s))
        });
        exact
            .or_else(|| self.lookup_abbreviation(text, &scope))
            .cloned()
    }

    fn region_of(&self, system: SystemId) -> Option<Region> {
        self.system_ids
            .get(&system)
            .and_then(|&i| self.regions.get(&self.systems[i].region))
            .cloned()
    }
}

impl ShipLookup for Catalog {
    fn lookup_ship(&self, text: &str) -> Option<ShipType> {
        self.ship_exact
            .get(text)
            .or_else(|| self.ship_names.get(&text.to_lowercase()))
            .map(|&i| self.ships[i].clone())
    }
}

impl WordLookup for Catalog {
    fn is_dictionary_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    fn is_type_name(&self, text: &str) -> bool {
        self.type_names.contains(&text.to_lowercase())
    }
}
