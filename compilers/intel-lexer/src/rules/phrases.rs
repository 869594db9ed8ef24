//! Fixed intel vocabulary: keywords, questions, movement verbs, gate words.

use intel_protocol::{KeywordKind, QuestionKind, TokenType};

use crate::candidate::Candidate;
use crate::matcher::MatchContext;

const MAX_KEYWORD_WORDS: usize = 3;

pub const KEYWORDS: &[(KeywordKind, &str)] = &[
    (KeywordKind::Clear, "clr"),
    (KeywordKind::Clear, "clear"),
    (KeywordKind::Clear, "all clear"),
    (KeywordKind::NoVisual, "nv"),
    (KeywordKind::NoVisual, "novis"),
    (KeywordKind::NoVisual, "no vis"),
    (KeywordKind::NoVisual, "no visual"),
    (KeywordKind::GateCamp, "camp"),
    (KeywordKind::GateCamp, "camped"),
    (KeywordKind::GateCamp, "camping"),
    (KeywordKind::GateCamp, "gatecamp"),
    (KeywordKind::GateCamp, "gate camp"),
    (KeywordKind::GateCamp, "gate camped"),
    (KeywordKind::Bubbles, "bubble"),
    (KeywordKind::Bubbles, "bubbles"),
    (KeywordKind::Bubbles, "bubbled"),
    (KeywordKind::Bubbles, "drag bubble"),
    (KeywordKind::Bubbles, "drag bubbles"),
    (KeywordKind::CombatProbes, "probes"),
    (KeywordKind::CombatProbes, "combats"),
    (KeywordKind::CombatProbes, "combat probes"),
    (KeywordKind::Cyno, "cyno"),
    (KeywordKind::Cyno, "cynos"),
    (KeywordKind::Cyno, "cyno up"),
    (KeywordKind::Cyno, "cyno lit"),
    (KeywordKind::Spike, "spike"),
    (KeywordKind::Spike, "local spike"),
    (KeywordKind::Wormhole, "wh"),
    (KeywordKind::Wormhole, "wormhole"),
    (KeywordKind::Ess, "ess"),
    (KeywordKind::Skyhook, "skyhook"),
    (KeywordKind::Skyhook, "skyhooks"),
];

/// `(kind, phrase, needs a trailing '?')`
pub const QUESTIONS: &[(QuestionKind, &str, bool)] = &[
    (QuestionKind::Location, "where", false),
    (QuestionKind::Location, "where is he", false),
    (QuestionKind::Location, "where is she", false),
    (QuestionKind::Location, "where are they", false),
    (QuestionKind::Location, "where now", false),
    (QuestionKind::Location, "location", true),
    (QuestionKind::Location, "loc", true),
    (QuestionKind::Location, "pos", true),
    (QuestionKind::ShipTypes, "ship", true),
    (QuestionKind::ShipTypes, "ships", true),
    (QuestionKind::ShipTypes, "shiptype", true),
    (QuestionKind::ShipTypes, "ship type", true),
    (QuestionKind::ShipTypes, "comp", true),
    (QuestionKind::ShipTypes, "fleet comp", true),
    (QuestionKind::ShipTypes, "what ship", false),
    (QuestionKind::ShipTypes, "what ships", false),
    (QuestionKind::ShipTypes, "which ship", false),
    (QuestionKind::Number, "how many", false),
    (QuestionKind::Number, "count", true),
    (QuestionKind::Number, "numbers", true),
    (QuestionKind::Status, "status", true),
    (QuestionKind::Status, "news", true),
    (QuestionKind::Status, "any news", false),
    (QuestionKind::Status, "anything", true),
    (QuestionKind::Status, "update", true),
    (QuestionKind::Clear, "clear", true),
    (QuestionKind::Clear, "clr", true),
    (QuestionKind::Clear, "still clear", true),
    (QuestionKind::Clear, "is it clear", false),
];

pub const MOVEMENT_VERBS: &[&str] = &[
    "jumped", "jumping", "jumps", "jump", "going", "gone", "went", "moving", "moved", "heading",
    "headed", "warping", "warped", "entered", "entering",
];

/// Optional word between a movement verb and its system.
pub const MOVEMENT_LINKS: &[&str] = &["to", "into", "in", "towards", "through", "thru"];

pub const GATE_WORDS: &[&str] = &["gate"];
pub const ANSIBLEX_WORDS: &[&str] = &["ansi", "ansiblex", "jb"];

/// Gate word at `index`: `Some(true)` for an ansiblex, `Some(false)` for a stargate.
pub fn gate_word(ctx: &MatchContext<'_>, index: usize) -> Option<bool> {
    let word = ctx.line.lower_core(index);
    if GATE_WORDS.contains(&word.as_str()) {
        Some(false)
    } else if ANSIBLEX_WORDS.contains(&word.as_str()) {
        Some(true)
    } else {
        None
    }
}

/// Movement verb phrases at `start`, as `(verb, words)`.
pub fn movement_verbs(ctx: &MatchContext<'_>, start: usize) -> Vec<(String, usize)> {
    let verb = ctx.line.lower_core(start);
    if !MOVEMENT_VERBS.contains(&verb.as_str()) {
        return Vec::new();
    }
    let mut phrases = vec![(verb.clone(), 1)];
    if start + 1 < ctx.line.len() && MOVEMENT_LINKS.contains(&ctx.line.lower_core(start + 1).as_str()) {
        phrases.push((verb, 2));
    }
    phrases
}

pub fn keyword_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    let longest = MAX_KEYWORD_WORDS.min(ctx.line.len() - start);
    for len in 1..=longest {
        // `clear?` asks rather than reports.
        if ctx.line.core(start + len - 1).ends_with('?') {
            continue;
        }
        let Some(text) = ctx.line.window(start, start + len) else {
            continue;
        };
        let text = text.to_lowercase();
        for (kind, phrase) in KEYWORDS {
            if *phrase == text {
                out.push(Candidate::new(start, len, TokenType::Keyword(*kind)));
            }
        }
    }
}

/// Questions only end a line.
pub fn question_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    let len = ctx.line.len() - start;
    if len == 0 || len > ctx.config.max_question_words {
        return;
    }
    let raw = ctx.line.slice(start, ctx.line.len());
    let lowered = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let trimmed = lowered.trim_end_matches(['.', '!']);
    let marked = trimmed.ends_with('?');
    let phrase = trimmed.trim_end_matches('?').trim_end();

    for (kind, candidate, needs_mark) in QUESTIONS {
        if *candidate == phrase && (marked || !needs_mark) {
            out.push(Candidate::new(
                start,
                len,
                TokenType::Question {
                    kind: *kind,
                    text: raw.to_string(),
                },
            ));
        }
    }
}
