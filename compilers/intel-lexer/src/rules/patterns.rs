//! Regex-shaped rules: URLs and kill reports.

use once_cell::sync::Lazy;
use regex::Regex;

use intel_protocol::TokenType;

use crate::candidate::Candidate;
use crate::matcher::MatchContext;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:https?://|www\.)\S+$").unwrap());

static KILL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ^kill:\s*
        (?P<name>[^()\[\]<>]+?)\s*
        (?:[\[<](?P<org>[^\]>]+)[\]>]\s*)?
        \((?P<ship>[^()]+)\)$",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillReport<'a> {
    pub name: &'a str,
    pub organization: Option<&'a str>,
    pub ship: &'a str,
}

pub fn is_url(word: &str) -> bool {
    URL_RE.is_match(word)
}

pub fn parse_kill(text: &str) -> Option<KillReport<'_>> {
    let caps = KILL_RE.captures(text)?;
    let name = caps.name("name")?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    Some(KillReport {
        name,
        organization: caps.name("org").map(|m| m.as_str().trim()),
        ship: caps.name("ship")?.as_str().trim(),
    })
}

/// Kill reports starting at `start`, as `(report, words)`.
pub fn kills_at<'a>(ctx: &MatchContext<'a>, start: usize) -> Vec<(KillReport<'a>, usize)> {
    let opener = ctx.line.words.get(start).map(|w| w.text).unwrap_or("");
    if !opener.to_ascii_lowercase().starts_with("kill:") {
        return Vec::new();
    }
    (start + 1..=ctx.line.len())
        .filter_map(|end| parse_kill(ctx.line.slice(start, end)).map(|kill| (kill, end - start)))
        .collect()
}

pub fn kill_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    for (kill, len) in kills_at(ctx, start) {
        let Some(target) = ctx.reference.lookup_ship(kill.ship) else {
            continue;
        };
        let character = ctx
            .characters
            .index_of(kill.name)
            .filter(|&index| ctx.characters.status(index).exists());
        out.push(Candidate::new(
            start,
            len,
            TokenType::Kill {
                name: kill.name.to_string(),
                character,
                organization: kill.organization.map(str::to_string),
                target,
            },
        ));
    }
}

pub fn url_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    if is_url(ctx.line.core(start)) {
        out.push(Candidate::new(start, 1, TokenType::Url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert!(is_url("https://zkillboard.com/kill/1/"));
        assert!(is_url("www.example.com"));
        assert!(!is_url("http"));
        assert!(!is_url("example.com"));
    }

    #[test]
    fn test_kill_reports() {
        assert_eq!(
            parse_kill("Kill: Shiva Callipso [GOONS] (Raven)"),
            Some(KillReport {
                name: "Shiva Callipso",
                organization: Some("GOONS"),
                ship: "Raven",
            })
        );
        assert_eq!(
            parse_kill("kill: Ishani Kalki (Capsule)"),
            Some(KillReport {
                name: "Ishani Kalki",
                organization: None,
                ship: "Capsule",
            })
        );
        assert_eq!(parse_kill("kill: (Capsule)"), None);
        assert_eq!(parse_kill("Kill: Ishani Kalki"), None);
    }
}
