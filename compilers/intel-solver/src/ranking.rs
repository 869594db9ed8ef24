//! Total order over tokenizations of one line. `Ordering::Greater` means better.

use std::cmp::Ordering;

use intel_protocol::{Token, TokenFlags, TokenType, Tokenization};

/// Per-tokenization tallies, compared field by field in declaration order.
///
/// Every field is a sum over tokens, so the score of a tokenization is the
/// sum of the scores of its parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Score {
    /// Words inside typed tokens pasted as links. More is better.
    pub linked_words: usize,
    /// Words inside characters that read as ordinary words. Fewer is better.
    pub word_like_words: usize,
    /// Words inside typed tokens. More is better.
    pub typed_words: usize,
    /// Systems resolved outside the active regions. Fewer is better.
    pub out_of_region: usize,
    /// Fewer is better.
    pub tokens: usize,
}

impl Score {
    pub fn of_token(token: &Token) -> Self {
        let words = token.span.len();
        let typed = !token.kind.is_plain();
        Self {
            linked_words: if typed && token.is_link() { words } else { 0 },
            word_like_words: if token.flags.contains(TokenFlags::WORD_LIKE) { words } else { 0 },
            typed_words: if typed { words } else { 0 },
            out_of_region: usize::from(token.flags.contains(TokenFlags::OUT_OF_REGION)),
            tokens: 1,
        }
    }

    pub fn of_tokens<'t>(tokens: impl IntoIterator<Item = &'t Token>) -> Self {
        tokens.into_iter().map(Self::of_token).fold(Self::default(), Self::add)
    }

    pub fn add(self, other: Self) -> Self {
        Self {
            linked_words: self.linked_words + other.linked_words,
            word_like_words: self.word_like_words + other.word_like_words,
            typed_words: self.typed_words + other.typed_words,
            out_of_region: self.out_of_region + other.out_of_region,
            tokens: self.tokens + other.tokens,
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.linked_words
            .cmp(&other.linked_words)
            .then_with(|| other.word_like_words.cmp(&self.word_like_words))
            .then_with(|| self.typed_words.cmp(&other.typed_words))
            .then_with(|| other.out_of_region.cmp(&self.out_of_region))
            .then_with(|| other.tokens.cmp(&self.tokens))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Preference between kinds on the same span, lower wins.
pub fn kind_rank(kind: &TokenType) -> u8 {
    match kind {
        TokenType::Kill { .. } => 0,
        TokenType::Movement { .. } => 1,
        TokenType::Gate { .. } => 2,
        TokenType::Ship { .. } => 3,
        TokenType::System(_) => 4,
        TokenType::Character(_) => 5,
        TokenType::Keyword(_) => 6,
        TokenType::Question { .. } => 7,
        TokenType::Count { .. } => 8,
        TokenType::Url => 9,
        TokenType::PlainText => 10,
    }
}

/// Greedy comparison of two tokens that start at the same word.
fn compare_heads(a: &Token, b: &Token) -> Ordering {
    a.span
        .end
        .cmp(&b.span.end)
        .then_with(|| (!a.kind.is_plain()).cmp(&!b.kind.is_plain()))
        .then_with(|| kind_rank(&b.kind).cmp(&kind_rank(&a.kind)))
        .then_with(|| b.kind.cmp(&a.kind))
        .then_with(|| b.cmp(a))
}

/// Tie-break on the first token where two token sequences part ways.
pub fn compare_sequences<'t>(
    a: impl IntoIterator<Item = &'t Token>,
    b: impl IntoIterator<Item = &'t Token>,
) -> Ordering {
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) if x == y => continue,
            (Some(x), Some(y)) => return compare_heads(x, y),
            // Prefixes of one another only when covering different lines.
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

pub fn score_tokenization(tokenization: &Tokenization) -> Score {
    Score::of_tokens(&tokenization.tokens)
}

/// Greater means `a` is the better reading of the line.
pub fn compare_tokenizations(a: &Tokenization, b: &Tokenization) -> Ordering {
    score_tokenization(a)
        .cmp(&score_tokenization(b))
        .then_with(|| compare_sequences(&a.tokens, &b.tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use intel_protocol::{CharacterIndex, KeywordKind, RegionId, SolarSystem, SystemId, WordSpan};

    fn token(start: usize, end: usize, kind: TokenType) -> Token {
        Token::new(WordSpan::new(start, end, "x"), kind)
    }

    fn plain(start: usize, end: usize) -> Token {
        Token::plain(WordSpan::new(start, end, "x"))
    }

    #[test]
    fn test_score_fields_in_order() {
        let linked = Score {
            linked_words: 1,
            tokens: 9,
            ..Score::default()
        };
        let typed = Score {
            typed_words: 5,
            ..Score::default()
        };
        assert!(linked > typed);

        let fewer_tokens = Score {
            typed_words: 2,
            tokens: 1,
            ..Score::default()
        };
        let more_tokens = Score {
            typed_words: 2,
            tokens: 2,
            ..Score::default()
        };
        assert!(fewer_tokens > more_tokens);

        let word_like = Score {
            word_like_words: 2,
            typed_words: 2,
            tokens: 1,
            ..Score::default()
        };
        assert!(Score { tokens: 1, ..Score::default() } > word_like);
    }

    #[test]
    fn test_score_is_additive() {
        let tokens = vec![
            token(0, 2, TokenType::Character(CharacterIndex(0))).with_flags(TokenFlags::LINK),
            plain(2, 3),
        ];
        let score = Score::of_tokens(&tokens);
        assert_eq!(score.linked_words, 2);
        assert_eq!(score.typed_words, 2);
        assert_eq!(score.tokens, 2);
        assert_eq!(score, Score::of_token(&tokens[0]).add(Score::of_token(&tokens[1])));
    }

    #[test]
    fn test_greedy_tie_break() {
        let longer = Tokenization::new(vec![token(0, 2, TokenType::Url), plain(2, 3)]);
        let shorter = Tokenization::new(vec![token(0, 1, TokenType::Url), token(1, 3, TokenType::Url)]);
        // More typed words outweigh a longer first token.
        assert_eq!(compare_tokenizations(&longer, &shorter), Ordering::Less);

        let keyword = Tokenization::new(vec![token(0, 1, TokenType::Keyword(KeywordKind::Clear))]);
        let character = Tokenization::new(vec![token(0, 1, TokenType::Character(CharacterIndex(0)))]);
        assert_eq!(compare_tokenizations(&character, &keyword), Ordering::Greater);
        assert_eq!(compare_tokenizations(&keyword, &keyword), Ordering::Equal);
    }

    #[test]
    fn test_out_of_region_system_loses_to_character() {
        let system = Tokenization::new(vec![
            token(0, 1, TokenType::System(SolarSystem {
                id: SystemId(20),
                name: "Jita".to_string(),
                region: RegionId(2),
            }))
            .with_flags(TokenFlags::LINK | TokenFlags::OUT_OF_REGION),
            plain(1, 2),
        ]);
        let character = Tokenization::new(vec![
            token(0, 1, TokenType::Character(CharacterIndex(0))).with_flags(TokenFlags::LINK),
            plain(1, 2),
        ]);

        assert!(score_tokenization(&character) > score_tokenization(&system));
        assert_eq!(compare_tokenizations(&character, &system), Ordering::Greater);

        // Without the flag the kind rank prefers the system.
        let in_region = Tokenization::new(vec![
            Token::new(system.tokens[0].span.clone(), system.tokens[0].kind.clone()).with_flags(TokenFlags::LINK),
            plain(1, 2),
        ]);
        assert_eq!(compare_tokenizations(&character, &in_region), Ordering::Less);
    }

    #[test]
    fn test_first_difference_decides() {
        let a = Tokenization::new(vec![
            token(0, 2, TokenType::Keyword(KeywordKind::Cyno)),
            token(2, 3, TokenType::Url),
        ]);
        let b = Tokenization::new(vec![
            token(0, 1, TokenType::Keyword(KeywordKind::Cyno)),
            token(1, 3, TokenType::Keyword(KeywordKind::Cyno)),
        ]);
        assert_eq!(compare_tokenizations(&a, &b), Ordering::Greater);
    }
}
