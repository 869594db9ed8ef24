use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use intel_protocol::{CharacterLookup, CharacterStatus};
use tracing::trace;

use crate::data::CharacterRecord;

/// Character statuses known up front, keyed case-insensitively.
///
/// Stands in for the live character service in tools and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCharacterDirectory {
    statuses: HashMap<String, CharacterStatus>,
}

impl StaticCharacterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[CharacterRecord]) -> Self {
        let mut directory = Self::new();
        for record in records {
            directory.insert(&record.name, record.status);
        }
        directory
    }

    pub fn insert(&mut self, name: &str, status: CharacterStatus) {
        self.statuses.insert(name.to_lowercase(), status);
    }

    pub fn with(mut self, name: &str, status: CharacterStatus) -> Self {
        self.insert(name, status);
        self
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[async_trait]
impl CharacterLookup for StaticCharacterDirectory {
    async fn lookup_character_statuses(
        &self,
        originator: Option<&str>,
        names: &[String],
    ) -> BTreeMap<String, CharacterStatus> {
        trace!(?originator, names = names.len(), "static character lookup");
        names
            .iter()
            .filter_map(|name| {
                self.statuses
                    .get(&name.to_lowercase())
                    .filter(|status| status.exists())
                    .map(|status| (name.clone(), *status))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_and_not_found_names_are_omitted() {
        let directory = StaticCharacterDirectory::new()
            .with("Shiva Callipso", CharacterStatus::Active)
            .with("Ghost", CharacterStatus::NotFound);

        let names = vec![
            "shiva callipso".to_string(),
            "Ghost".to_string(),
            "Nobody".to_string(),
        ];
        let statuses = directory.lookup_character_statuses(Some("Reporter"), &names).await;

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses.get("shiva callipso"), Some(&CharacterStatus::Active));
    }

    #[test]
    fn test_from_records() {
        let directory = StaticCharacterDirectory::from_records(&[CharacterRecord {
            name: "Ishani Kalki".to_string(),
            status: CharacterStatus::Inactive,
        }]);
        assert_eq!(directory.len(), 1);
    }
}
