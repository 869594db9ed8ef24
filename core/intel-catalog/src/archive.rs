use std::fs;
use std::path::Path;

use rkyv::AlignedVec;
use thiserror::Error;

use crate::data::CatalogData;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog archive: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize catalog: {0}")]
    Serialize(String),
    #[error("catalog archive is invalid: {0}")]
    InvalidArchive(String),
    #[error("system {system} refers to unknown region {region}")]
    UnknownRegion { system: String, region: u32 },
}

/// Serializes catalog data into an rkyv archive.
pub fn to_archive(data: &CatalogData) -> Result<Vec<u8>, CatalogError> {
    let bytes = rkyv::to_bytes::<_, 4096>(data)
        .map_err(|e| CatalogError::Serialize(format!("{:?}", e)))?;
    Ok(bytes.to_vec())
}

/// Validates and deserializes an rkyv archive.
pub fn from_archive(bytes: &[u8]) -> Result<CatalogData, CatalogError> {
    // Archives read from disk are not guaranteed to be aligned.
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    rkyv::from_bytes::<CatalogData>(&aligned)
        .map_err(|e| CatalogError::InvalidArchive(format!("{:?}", e)))
}

pub fn load_archive(path: impl AsRef<Path>) -> Result<CatalogData, CatalogError> {
    let bytes = fs::read(path)?;
    from_archive(&bytes)
}
