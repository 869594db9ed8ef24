//! Per-kind candidate rules. Each `*_candidates` function appends every
//! candidate of its kind that starts at a given word.

pub mod characters;
pub mod count;
pub mod patterns;
pub mod phrases;
pub mod ships;
pub mod systems;
