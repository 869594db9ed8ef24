use intel_protocol::{CharacterStatus, RegionId, SystemId, TypeId};
use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RegionRecord {
    pub id: RegionId,
    pub name: String,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SystemRecord {
    pub id: SystemId,
    pub name: String,
    pub region: RegionId,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ShipRecord {
    pub id: TypeId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
    /// Name and aliases only match with their exact capitalization.
    #[cfg_attr(feature = "serde", serde(default))]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CharacterRecord {
    pub name: String,
    pub status: CharacterStatus,
}

/// Everything a catalog is built from; the unit of (de)serialization.
#[derive(Debug, Clone, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CatalogData {
    pub version: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regions: Vec<RegionRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub systems: Vec<SystemRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ships: Vec<ShipRecord>,
    /// Non-ship item type names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_names: Vec<String>,
    /// Dictionary of ordinary words.
    #[cfg_attr(feature = "serde", serde(default))]
    pub words: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub characters: Vec<CharacterRecord>,
}
