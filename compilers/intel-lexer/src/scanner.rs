use nom::{
    bytes::complete::{take_till1, take_while},
    IResult,
};

/// Characters stripped from the front of a word to get its core.
pub const LEADING_PUNCT: &[char] = &['"', '\'', '(', '[', '{', '<'];
/// Characters stripped from the back of a word to get its core. `?` is kept.
pub const TRAILING_PUNCT: &[char] = &[',', '.', ';', ':', '!', '"', '\'', ')', ']', '}', '>'];

/// Whitespace runs at least this wide delimit pasted links.
const LINK_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    /// Byte offsets into the line.
    pub start: usize,
    pub end: usize,
    /// Whitespace characters between the previous word (or line start) and this one.
    pub gap_before: usize,
}

impl<'a> Word<'a> {
    /// The word without surrounding punctuation.
    pub fn core(&self) -> &'a str {
        self.text
            .trim_start_matches(LEADING_PUNCT)
            .trim_end_matches(TRAILING_PUNCT)
    }

    fn has_trailing_punct(&self) -> bool {
        self.text.ends_with(TRAILING_PUNCT)
    }

    /// Ends in closing punctuation or a question mark.
    fn ends_name(&self) -> bool {
        self.has_trailing_punct() || self.text.ends_with('?')
    }

    fn has_leading_punct(&self) -> bool {
        self.text.starts_with(LEADING_PUNCT)
    }
}

/// A line split into words, with the whitespace layout needed to spot links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    pub line: &'a str,
    pub words: Vec<Word<'a>>,
    pub trailing_gap: usize,
}

fn gap(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

/// Splits a line into words. Lines with no alphanumeric character at all
/// (blank, lone punctuation) yield no words.
pub fn scan(line: &str) -> ScannedLine<'_> {
    let mut input = line;
    let mut words = Vec::new();
    let mut trailing_gap = 0;

    loop {
        let (rest, spaces) = match gap(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        let spaces = spaces.chars().count();
        if rest.is_empty() {
            trailing_gap = spaces;
            break;
        }
        let (next, text) = match word(rest) {
            Ok(res) => res,
            Err(_) => break,
        };
        // `text` is a subslice of `line`
        let start = text.as_ptr() as usize - line.as_ptr() as usize;
        words.push(Word {
            text,
            start,
            end: start + text.len(),
            gap_before: spaces,
        });
        input = next;
    }

    if !words.iter().any(|w| w.text.chars().any(char::is_alphanumeric)) {
        words.clear();
        trailing_gap = 0;
    }

    ScannedLine {
        line,
        words,
        trailing_gap,
    }
}

impl<'a> ScannedLine<'a> {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn texts(&self) -> Vec<&'a str> {
        self.words.iter().map(|w| w.text).collect()
    }

    /// Original text of words `start..end`, inner whitespace preserved.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        if start >= end || end > self.words.len() {
            return "";
        }
        &self.line[self.words[start].start..self.words[end - 1].end]
    }

    pub fn core(&self, index: usize) -> &'a str {
        self.words.get(index).map(|w| w.core()).unwrap_or("")
    }

    pub fn lower_core(&self, index: usize) -> String {
        self.core(index).to_lowercase()
    }

    /// Whether word `index` ends in closing punctuation, as in `Jita,`.
    pub fn closes(&self, index: usize) -> bool {
        self.words.get(index).map_or(false, |w| w.has_trailing_punct())
    }

    fn boundary_before(&self, index: usize) -> bool {
        index == 0 || self.words[index].gap_before >= LINK_GAP
    }

    fn boundary_after(&self, end: usize) -> bool {
        if end == self.words.len() {
            self.trailing_gap >= LINK_GAP
        } else {
            self.words[end].gap_before >= LINK_GAP
        }
    }

    /// Whether words `start..end` are bracketed like a pasted in-game link.
    pub fn is_link(&self, start: usize, end: usize) -> bool {
        start < end && end <= self.words.len() && self.boundary_before(start) && self.boundary_after(end)
    }

    /// Text of words `start..end` as a single entity name, or `None` when the
    /// window cannot be one name (inner punctuation, crosses a link boundary).
    ///
    /// A trailing `?` is dropped, so `1DQ1-A?` still names the system.
    pub fn window(&self, start: usize, end: usize) -> Option<String> {
        if start >= end || end > self.words.len() {
            return None;
        }
        if end - start == 1 {
            let core = self
                .core(start)
                .trim_end_matches(|c: char| c == '?' || TRAILING_PUNCT.contains(&c));
            return (!core.is_empty()).then(|| core.to_string());
        }

        let mut parts = Vec::with_capacity(end - start);
        for index in start..end {
            let word = &self.words[index];
            if index > start && (word.gap_before >= LINK_GAP || word.has_leading_punct()) {
                return None;
            }
            if index + 1 < end && word.ends_name() {
                return None;
            }
            let part = if index == start {
                word.text.trim_start_matches(LEADING_PUNCT)
            } else if index + 1 == end {
                word.text
                    .trim_end_matches(|c: char| c == '?' || TRAILING_PUNCT.contains(&c))
            } else {
                word.text
            };
            if part.is_empty() {
                return None;
            }
            parts.push(part);
        }
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_offsets_and_gaps() {
        let line = " D-W7F0  Ishani Kalki  Shiva Callipso";
        let scanned = scan(line);

        assert_eq!(scanned.texts(), vec!["D-W7F0", "Ishani", "Kalki", "Shiva", "Callipso"]);
        assert_eq!(scanned.words[0].gap_before, 1);
        assert_eq!(scanned.words[1].gap_before, 2);
        assert_eq!(&line[scanned.words[2].start..scanned.words[2].end], "Kalki");
        assert_eq!(scanned.slice(1, 3), "Ishani Kalki");
    }

    #[test]
    fn test_blank_and_punctuation_lines_have_no_words() {
        assert!(scan("").is_empty());
        assert!(scan(" ").is_empty());
        assert!(scan(",").is_empty());
        assert!(scan(" ?  ! ").is_empty());
        assert_eq!(scan("Jita ,").len(), 2);
    }

    #[test]
    fn test_link_detection() {
        let scanned = scan("D-W7F0  Ishani Kalki  Shiva Callipso");

        assert!(scanned.is_link(0, 1));
        assert!(scanned.is_link(1, 3));
        assert!(!scanned.is_link(1, 2));
        // The last span has no trailing double space.
        assert!(!scanned.is_link(3, 5));
        assert!(scan("Jita  ").is_link(0, 1));
    }

    #[test]
    fn test_windows() {
        let scanned = scan("(Jita, Amarr) Old Man Star.  Kalki");

        assert_eq!(scanned.window(0, 1).as_deref(), Some("Jita"));
        assert_eq!(scanned.window(0, 2), None);
        assert_eq!(scanned.window(1, 2).as_deref(), Some("Amarr"));
        assert_eq!(scanned.window(2, 5).as_deref(), Some("Old Man Star"));
        // Crosses a double-space link boundary.
        assert_eq!(scanned.window(4, 6), None);
        assert_eq!(scanned.window(5, 5), None);
    }

    #[test]
    fn test_windows_drop_question_marks() {
        let scanned = scan("seen Shiva Callipso?  in 1DQ1-A?!");

        assert_eq!(scanned.window(1, 3).as_deref(), Some("Shiva Callipso"));
        assert_eq!(scanned.window(4, 5).as_deref(), Some("1DQ1-A"));
        assert_eq!(scanned.window(2, 3).as_deref(), Some("Callipso"));
        assert_eq!(scan("where? Jita").window(0, 2), None);
        assert_eq!(scan("??").window(0, 1), None);
    }

    #[test]
    fn test_core_keeps_question_mark() {
        let scanned = scan("clear? \"D-W7F0\",");
        assert_eq!(scanned.core(0), "clear?");
        assert_eq!(scanned.core(1), "D-W7F0");
    }
}
