pub mod ids;
pub mod lookup;

// Re-export core types for convenience
pub use ids::{CharacterIndex, RegionId, SystemId, TypeId};
pub use lookup::{CharacterLookup, ReferenceData, ShipLookup, SystemLookup, WordLookup};

pub mod model;
pub use model::*;

pub mod token;
pub use token::*;
