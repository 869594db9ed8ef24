use intel_protocol::{CharacterBatch, ReferenceData, TokenFlags};

use crate::candidate::{Candidate, CandidateSet};
use crate::config::{MatchKinds, ParserConfig};
use crate::rules::ships::{ship_matches, ShipMatch};
use crate::rules::systems::{system_matches, SystemMatch};
use crate::rules::{characters, count, patterns, phrases, ships, systems};
use crate::scanner::ScannedLine;

/// Everything the rules consult for one line.
///
/// Ship and system lookups are resolved once per line up front, since
/// several rules (counts, gates, movements) look at the same windows.
pub struct MatchContext<'a> {
    pub line: ScannedLine<'a>,
    pub reference: &'a dyn ReferenceData,
    pub characters: &'a CharacterBatch,
    pub config: &'a ParserConfig,
    pub regions: &'a [String],
    ships: Vec<Vec<ShipMatch>>,
    systems: Vec<Vec<SystemMatch>>,
}

impl<'a> MatchContext<'a> {
    pub fn new(
        line: ScannedLine<'a>,
        reference: &'a dyn ReferenceData,
        characters: &'a CharacterBatch,
        config: &'a ParserConfig,
        regions: &'a [String],
    ) -> Self {
        let ships = if config.enables(MatchKinds::SHIP) {
            ship_matches(&line, reference, config)
        } else {
            Vec::new()
        };
        let systems = if config.enables(MatchKinds::SYSTEM | MatchKinds::GATE | MatchKinds::MOVEMENT) {
            system_matches(&line, reference, regions, config)
        } else {
            Vec::new()
        };
        Self {
            line,
            reference,
            characters,
            config,
            regions,
            ships,
            systems,
        }
    }

    pub fn ships_at(&self, start: usize) -> &[ShipMatch] {
        self.ships.get(start).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn systems_at(&self, start: usize) -> &[SystemMatch] {
        self.systems.get(start).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every typed candidate starting at word `start`, link-flagged where
    /// the span was pasted as a link.
    pub fn candidates_at(&self, start: usize) -> Vec<Candidate> {
        let mut out = Vec::new();
        if start >= self.line.len() {
            return out;
        }
        let kinds = self.config.kinds;

        if kinds.contains(MatchKinds::KILL) {
            patterns::kill_candidates(self, start, &mut out);
        }
        if kinds.contains(MatchKinds::URL) {
            patterns::url_candidates(self, start, &mut out);
        }
        if kinds.intersects(MatchKinds::SYSTEM | MatchKinds::GATE) {
            systems::system_candidates(self, start, &mut out);
        }
        if kinds.contains(MatchKinds::MOVEMENT) {
            systems::movement_candidates(self, start, &mut out);
        }
        if kinds.contains(MatchKinds::CHARACTER) {
            characters::character_candidates(self, start, &mut out);
        }
        if kinds.contains(MatchKinds::SHIP) {
            ships::ship_candidates(self, start, &mut out);
        }
        if kinds.contains(MatchKinds::COUNT) {
            count::count_candidates(self, start, &mut out);
        }
        if kinds.contains(MatchKinds::KEYWORD) {
            phrases::keyword_candidates(self, start, &mut out);
        }
        if kinds.contains(MatchKinds::QUESTION) {
            phrases::question_candidates(self, start, &mut out);
        }

        for candidate in &mut out {
            if self.line.is_link(candidate.start, candidate.end()) {
                candidate.flags |= TokenFlags::LINK;
            }
        }
        out
    }

    /// Candidates for every word of the line.
    pub fn candidates(&self) -> CandidateSet {
        let mut set = CandidateSet::new(self.line.len());
        for start in 0..self.line.len() {
            for candidate in self.candidates_at(start) {
                set.push(candidate);
            }
        }
        set
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scanner::scan;
    use intel_catalog::{Catalog, CatalogData, RegionRecord, ShipRecord, SystemRecord};
    use intel_protocol::{KeywordKind, RegionId, SystemId, TokenType, TypeId};

    pub(crate) fn reference() -> Catalog {
        let ship = |id: u32, name: &str, aliases: &[&str], case_sensitive: bool| ShipRecord {
            id: TypeId(id),
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            case_sensitive,
        };
        let data = CatalogData {
            version: 1,
            regions: vec![
                RegionRecord { id: RegionId(1), name: "Delve".to_string() },
                RegionRecord { id: RegionId(2), name: "The Forge".to_string() },
            ],
            systems: vec![
                SystemRecord { id: SystemId(10), name: "1DQ1-A".to_string(), region: RegionId(1) },
                SystemRecord { id: SystemId(11), name: "D-W7F0".to_string(), region: RegionId(1) },
                SystemRecord { id: SystemId(20), name: "Jita".to_string(), region: RegionId(2) },
            ],
            ships: vec![
                ship(670, "Capsule", &["pod"], false),
                ship(638, "Raven", &[], false),
                ship(626, "Vexor", &[], false),
                ship(17843, "Vexor Navy Issue", &["VNI"], false),
                ship(22430, "Sin", &[], true),
            ],
            type_names: vec!["Tritanium".to_string()],
            words: ["the", "blues", "was", "where", "is", "he", "in", "to", "gate", "camp", "hostile"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            characters: vec![],
        };
        Catalog::from_data(&data).unwrap()
    }

    pub(crate) fn context_in<'a>(
        line: &'a str,
        reference: &'a Catalog,
        characters: &'a CharacterBatch,
        config: &'a ParserConfig,
        regions: &'a [String],
    ) -> MatchContext<'a> {
        MatchContext::new(scan(line), reference, characters, config, regions)
    }

    pub(crate) fn context_for<'a>(
        line: &'a str,
        reference: &'a Catalog,
        characters: &'a CharacterBatch,
        config: &'a ParserConfig,
    ) -> MatchContext<'a> {
        context_in(line, reference, characters, config, &[])
    }

    #[test]
    fn test_link_flag_is_added() {
        let reference = reference();
        let config = ParserConfig::default();
        let batch = CharacterBatch::new();
        let ctx = context_for("Jita  nv", &reference, &batch, &config);

        let found = ctx.candidates_at(0);
        assert_eq!(found.len(), 1);
        assert!(found[0].flags.contains(TokenFlags::LINK));
        assert!(!ctx.candidates_at(1)[0].flags.contains(TokenFlags::LINK));
    }

    #[test]
    fn test_disabled_kinds_are_not_offered() {
        let reference = reference();
        let config = ParserConfig {
            kinds: MatchKinds::KEYWORD,
            ..ParserConfig::default()
        };
        let batch = CharacterBatch::new();
        let ctx = context_for("Jita clear raven", &reference, &batch, &config);

        let kinds: Vec<TokenType> = ctx.candidates().iter().map(|c| c.kind.clone()).collect();
        assert_eq!(kinds, vec![TokenType::Keyword(KeywordKind::Clear)]);
    }

    #[test]
    fn test_past_the_end_is_empty() {
        let reference = reference();
        let config = ParserConfig::default();
        let batch = CharacterBatch::new();
        let ctx = context_for("Jita", &reference, &batch, &config);

        assert!(ctx.candidates_at(1).is_empty());
        assert_eq!(ctx.candidates().words(), 1);
    }
}
