use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use intel_catalog::{load_archive, CatalogData};
use intel_lexer::ParserConfig;

/// Reads catalog data from JSON (`.json`) or a compiled rkyv archive (anything else).
pub fn read_catalog(path: &Path) -> Result<CatalogData> {
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing catalog {}", path.display()))
    } else {
        load_archive(path).with_context(|| format!("loading archive {}", path.display()))
    }
}

pub fn read_config(path: Option<&Path>) -> Result<ParserConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            ParserConfig::from_json(&text).with_context(|| format!("parser config {}", path.display()))
        }
        None => Ok(ParserConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intel_catalog::to_archive;
    use std::io::Write;

    const CATALOG: &str = r#"{
        "version": 3,
        "regions": [{ "id": 10000060, "name": "Delve" }],
        "systems": [{ "id": 30004759, "name": "1DQ1-A", "region": 10000060 }],
        "ships": [{ "id": 670, "name": "Capsule", "aliases": ["pod"] }]
    }"#;

    #[test]
    fn test_json_and_archive_agree() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json.write_all(CATALOG.as_bytes()).unwrap();
        let from_json = read_catalog(json.path()).unwrap();
        assert_eq!(from_json.version, 3);
        assert!(!from_json.ships[0].case_sensitive);

        let archive = tempfile::Builder::new().suffix(".rkyv").tempfile().unwrap();
        fs::write(archive.path(), to_archive(&from_json).unwrap()).unwrap();
        let from_archive = read_catalog(archive.path()).unwrap();
        assert_eq!(from_archive.systems[0].name, "1DQ1-A");
    }

    #[test]
    fn test_unreadable_archive_is_an_error() {
        let mut corrupt = tempfile::Builder::new().suffix(".rkyv").tempfile().unwrap();
        corrupt.write_all(&[1, 2, 3]).unwrap();

        let err = read_catalog(corrupt.path()).unwrap_err();
        assert!(err.to_string().starts_with("loading archive"));
        assert!(read_catalog(Path::new("/nonexistent/catalog.rkyv")).is_err());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        assert_eq!(read_config(None).unwrap(), ParserConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "beam_width": 0 }"#).unwrap();
        assert!(read_config(Some(file.path())).is_err());
    }
}
