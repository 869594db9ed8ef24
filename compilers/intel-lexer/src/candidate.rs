use intel_protocol::{TokenFlags, TokenType};

/// A typed interpretation of words `start..start + len`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub start: usize,
    pub len: usize,
    pub kind: TokenType,
    pub flags: TokenFlags,
}

impl Candidate {
    pub fn new(start: usize, len: usize, kind: TokenType) -> Self {
        Self {
            start,
            len,
            kind,
            flags: TokenFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Candidates of a line grouped by start position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    by_start: Vec<Vec<Candidate>>,
}

impl CandidateSet {
    pub fn new(words: usize) -> Self {
        Self {
            by_start: vec![Vec::new(); words],
        }
    }

    /// Adds a candidate unless an identical one is present. Empty or
    /// out-of-range spans are ignored.
    pub fn push(&mut self, candidate: Candidate) {
        if candidate.len == 0 || candidate.end() > self.by_start.len() {
            return;
        }
        let slot = &mut self.by_start[candidate.start];
        if !slot.contains(&candidate) {
            slot.push(candidate);
        }
    }

    pub fn at(&self, start: usize) -> &[Candidate] {
        self.by_start.get(start).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn words(&self) -> usize {
        self.by_start.len()
    }

    pub fn len(&self) -> usize {
        self.by_start.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.by_start.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intel_protocol::KeywordKind;

    #[test]
    fn test_push_dedupes_and_bounds() {
        let mut set = CandidateSet::new(2);
        set.push(Candidate::new(0, 1, TokenType::Keyword(KeywordKind::Clear)));
        set.push(Candidate::new(0, 1, TokenType::Keyword(KeywordKind::Clear)));
        set.push(Candidate::new(1, 2, TokenType::Url));
        set.push(Candidate::new(1, 0, TokenType::Url));

        assert_eq!(set.len(), 1);
        assert_eq!(set.at(0).len(), 1);
        assert!(set.at(5).is_empty());
    }
}
