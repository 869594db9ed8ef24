use std::cmp::Ordering;
use std::rc::Rc;

use intel_lexer::{Candidate, LexedLine};
use intel_protocol::{Token, Tokenization, WordSpan};
use tracing::debug;

use crate::lattice::Lattice;
use crate::ranking::{compare_sequences, compare_tokenizations, Score};

/// A tokenization of the words from some position to the end of the line,
/// stored as a shared linked list so suffixes are reused across prefixes.
#[derive(Debug)]
struct Suffix {
    token: Token,
    next: Option<Rc<Suffix>>,
    score: Score,
}

impl Suffix {
    fn tokens(&self) -> SuffixTokens<'_> {
        SuffixTokens { next: Some(self) }
    }

    fn is_plain(&self) -> bool {
        self.token.kind.is_plain()
    }
}

struct SuffixTokens<'s> {
    next: Option<&'s Suffix>,
}

impl<'s> Iterator for SuffixTokens<'s> {
    type Item = &'s Token;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next.as_deref();
        Some(&current.token)
    }
}

fn compare_suffixes(a: &Suffix, b: &Suffix) -> Ordering {
    a.score
        .cmp(&b.score)
        .then_with(|| compare_sequences(a.tokens(), b.tokens()))
}

/// Prepends the edge `start..end` to `tail`, coalescing plain text.
fn extend(
    lexed: &LexedLine<'_>,
    start: usize,
    end: usize,
    candidate: Option<&Candidate>,
    tail: Option<&Rc<Suffix>>,
) -> Rc<Suffix> {
    let tail_score = tail.map(|t| t.score).unwrap_or_default();
    match (candidate, tail) {
        (None, Some(tail)) if tail.is_plain() => {
            let merged_end = tail.token.span.end;
            Rc::new(Suffix {
                token: Token::plain(WordSpan::new(start, merged_end, lexed.line.slice(start, merged_end))),
                next: tail.next.clone(),
                score: tail_score,
            })
        }
        _ => {
            let span = WordSpan::new(start, end, lexed.line.slice(start, end));
            let token = match candidate {
                Some(candidate) => Token::new(span, candidate.kind.clone()).with_flags(candidate.flags),
                None => Token::plain(span),
            };
            let score = tail_score.add(Score::of_token(&token));
            Rc::new(Suffix {
                token,
                next: tail.cloned(),
                score,
            })
        }
    }
}

/// Keeps the best `width` suffixes of each head class, best first.
fn prune(mut suffixes: Vec<Rc<Suffix>>, width: usize) -> Vec<Rc<Suffix>> {
    suffixes.sort_by(|a, b| compare_suffixes(b, a));
    suffixes.dedup_by(|a, b| compare_suffixes(a, b) == Ordering::Equal);

    let (plain, typed): (Vec<_>, Vec<_>) = suffixes.into_iter().partition(|s| s.is_plain());
    plain
        .into_iter()
        .take(width)
        .chain(typed.into_iter().take(width))
        .collect()
}

fn materialize(suffix: &Suffix) -> Tokenization {
    Tokenization::new(suffix.tokens().cloned().collect())
}

/// Every retained full-coverage tokenization of the line, best first.
///
/// Suffixes are built from the last word backwards and memoized per
/// position. Each position keeps `beam_width` plain-headed and
/// `beam_width` typed-headed suffixes. Since scores add up over tokens and
/// only plain-headed suffixes can merge with a preceding plain word, the
/// best tokenization of the line is never pruned.
pub fn enumerate(lexed: &LexedLine<'_>, beam_width: usize) -> Vec<Tokenization> {
    let words = lexed.words();
    if words == 0 {
        return Vec::new();
    }
    let width = beam_width.max(1);
    let lattice = Lattice::build(&lexed.candidates);

    let mut memo: Vec<Vec<Rc<Suffix>>> = vec![Vec::new(); words + 1];
    for position in (0..words).rev() {
        let mut suffixes = Vec::new();
        for (end, candidate) in lattice.edges_from(position) {
            if end == words {
                suffixes.push(extend(lexed, position, end, candidate, None));
                continue;
            }
            for tail in &memo[end] {
                suffixes.push(extend(lexed, position, end, candidate, Some(tail)));
            }
        }
        memo[position] = prune(suffixes, width);
    }

    let mut results: Vec<Tokenization> = memo[0].iter().map(|s| materialize(s)).collect();
    results.sort_by(|a, b| compare_tokenizations(b, a));
    debug!(
        words,
        edges = lattice.edge_count(),
        tokenizations = results.len(),
        "line enumerated"
    );

    if cfg!(debug_assertions) {
        let texts = lexed.line.texts();
        for tokenization in &results {
            debug_assert_eq!(tokenization.check_coverage(&texts), Ok(()));
        }
    }
    results
}
