use std::collections::BTreeMap;

use intel_protocol::{CharacterBatch, CharacterStatus, TokenFlags, TokenType};

use crate::candidate::Candidate;
use crate::config::ParserConfig;
use crate::matcher::MatchContext;
use crate::rules::patterns::parse_kill;
use crate::scanner::ScannedLine;

const MIN_NAME_CHARS: usize = 3;
const MAX_NAME_CHARS: usize = 37;

/// Whether `name` could be a player character name at all.
pub fn is_plausible_name(name: &str) -> bool {
    let chars = name.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&chars) {
        return false;
    }
    let allowed = name
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '\'');
    let bounded = name.starts_with(char::is_alphanumeric) && name.ends_with(char::is_alphanumeric);
    allowed && bounded && name.chars().any(char::is_alphabetic)
}

/// Every plausible name window of the line, plus kill report victims.
pub fn collect_names(line: &ScannedLine<'_>, config: &ParserConfig) -> CharacterBatch {
    let mut batch = CharacterBatch::new();
    for start in 0..line.len() {
        let longest = config.max_character_words.min(line.len() - start);
        for end in start + 1..=start + longest {
            if let Some(name) = line.window(start, end).filter(|n| is_plausible_name(n)) {
                batch.insert(&name);
            }
        }
        if line.words[start].text.to_ascii_lowercase().starts_with("kill:") {
            for end in start + 1..=line.len() {
                if let Some(kill) = parse_kill(line.slice(start, end)) {
                    if is_plausible_name(kill.name) {
                        batch.insert(kill.name);
                    }
                }
            }
        }
    }
    batch
}

/// Copies looked-up statuses into the batch. Names the lookup left out stay `NotFound`.
pub fn apply_statuses(batch: &mut CharacterBatch, statuses: &BTreeMap<String, CharacterStatus>) {
    let lowered: BTreeMap<String, CharacterStatus> = statuses
        .iter()
        .map(|(name, status)| (name.to_lowercase(), *status))
        .collect();
    for entry in &mut batch.entries {
        if let Some(status) = lowered.get(&entry.name.to_lowercase()) {
            entry.status = *status;
        }
    }
}

fn reads_as_words(ctx: &MatchContext<'_>, name: &str) -> bool {
    ctx.reference.is_type_name(name)
        || name
            .split(' ')
            .all(|word| ctx.reference.is_dictionary_word(word))
}

pub fn character_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    let longest = ctx.config.max_character_words.min(ctx.line.len() - start);
    for len in 1..=longest {
        let Some(name) = ctx.line.window(start, start + len) else {
            continue;
        };
        let Some(index) = ctx.characters.index_of(&name) else {
            continue;
        };
        let status = ctx.characters.status(index);
        let offered = match status {
            CharacterStatus::Active | CharacterStatus::Inactive => true,
            CharacterStatus::Dormant => ctx.line.is_link(start, start + len),
            CharacterStatus::NotFound => false,
        };
        if !offered {
            continue;
        }
        let mut candidate = Candidate::new(start, len, TokenType::Character(index));
        if status != CharacterStatus::Active && reads_as_words(ctx, &name) {
            candidate = candidate.with_flags(TokenFlags::WORD_LIKE);
        }
        out.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::tests::{context_for, reference};
    use crate::scanner::scan;
    use intel_protocol::CharacterIndex;

    #[test]
    fn test_name_validator() {
        assert!(is_plausible_name("Shiva Callipso"));
        assert!(is_plausible_name("was"));
        assert!(is_plausible_name("O'Neil-2"));
        assert!(!is_plausible_name("ab"));
        assert!(!is_plausible_name("1234"));
        assert!(!is_plausible_name("-dash"));
        assert!(!is_plausible_name("where?"));
        assert!(!is_plausible_name(&"a".repeat(38)));
    }

    #[test]
    fn test_collect_names_is_bounded_and_unique() {
        let config = ParserConfig::default();
        let line = scan("Ishani Kalki was ishani kalki");
        let batch = collect_names(&line, &config);

        assert!(batch.index_of("Ishani Kalki").is_some());
        assert!(batch.index_of("Kalki was ishani").is_some());
        assert!(batch.index_of("Ishani Kalki was ishani").is_none());
        // "ishani kalki" shares the first spelling's slot.
        assert_eq!(batch.names().iter().filter(|n| n.eq_ignore_ascii_case("ishani kalki")).count(), 1);
    }

    #[test]
    fn test_collect_names_includes_kill_victims() {
        let config = ParserConfig {
            max_character_words: 1,
            ..ParserConfig::default()
        };
        let batch = collect_names(&scan("Kill: Shiva Callipso (Raven)"), &config);
        assert!(batch.index_of("Shiva Callipso").is_some());
    }

    #[test]
    fn test_apply_statuses_is_case_insensitive() {
        let mut batch = CharacterBatch::new();
        let index = batch.insert("Shiva Callipso");
        let other = batch.insert("Nobody");

        let mut statuses = BTreeMap::new();
        statuses.insert("shiva callipso".to_string(), CharacterStatus::Inactive);
        apply_statuses(&mut batch, &statuses);

        assert_eq!(batch.status(index), CharacterStatus::Inactive);
        assert_eq!(batch.status(other), CharacterStatus::NotFound);
    }

    fn batch_with(names: &[(&str, CharacterStatus)]) -> CharacterBatch {
        let mut batch = CharacterBatch::new();
        for (name, status) in names {
            batch.insert(name);
            let index = batch.index_of(name).unwrap();
            batch.entries[index.0].status = *status;
        }
        batch
    }

    #[test]
    fn test_status_gates_candidates() {
        let reference = reference();
        let config = ParserConfig::default();
        let batch = batch_with(&[
            ("Shiva", CharacterStatus::Dormant),
            ("Shiva Callipso", CharacterStatus::Active),
            ("Ghost", CharacterStatus::NotFound),
        ]);

        let ctx = context_for("Shiva Callipso Ghost", &reference, &batch, &config);
        let mut out = Vec::new();
        character_candidates(&ctx, 0, &mut out);
        character_candidates(&ctx, 2, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, TokenType::Character(CharacterIndex(1)));

        // Pasted as a link, the dormant name is offered too.
        let ctx = context_for("Shiva  Callipso", &reference, &batch, &config);
        let mut out = Vec::new();
        character_candidates(&ctx, 0, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, TokenType::Character(CharacterIndex(0)));
    }

    #[test]
    fn test_inactive_dictionary_names_are_word_like() {
        let reference = reference();
        let config = ParserConfig::default();
        let batch = batch_with(&[
            ("the blues", CharacterStatus::Inactive),
            ("was", CharacterStatus::Active),
            ("Tritanium", CharacterStatus::Inactive),
        ]);

        let ctx = context_for("the blues was Tritanium", &reference, &batch, &config);
        let mut out = Vec::new();
        for start in 0..4 {
            character_candidates(&ctx, start, &mut out);
        }
        let flags: Vec<(usize, bool)> = out
            .iter()
            .map(|c| (c.start, c.flags.contains(TokenFlags::WORD_LIKE)))
            .collect();
        assert_eq!(flags, vec![(0, true), (2, false), (3, true)]);
    }
}
