//! Inflection helpers for intel chat: plural ship names, spelled-out numbers
//! and name normalization.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::string::String;

fn ends_with_sibilant(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s))
}

/// Candidate singular forms of a plural, most likely first.
///
/// `"ravens"` gives `["raven"]`, `"crushes"` gives `["crush", "crushe"]`.
/// Words without a plural ending give nothing.
pub fn singular_forms(word: &str) -> alloc::vec::Vec<String> {
    let mut forms = alloc::vec::Vec::new();
    let lower = word.to_ascii_lowercase();
    if word.chars().count() < 3 || !lower.ends_with('s') || lower.ends_with("ss") {
        return forms;
    }
    let stem = &word[..word.len() - 1];
    if lower.ends_with("es") {
        let shorter = &word[..word.len() - 2];
        if ends_with_sibilant(shorter) {
            forms.push(String::from(shorter));
        }
    }
    if stem.ends_with(|c: char| c.is_alphanumeric()) {
        forms.push(String::from(stem));
    }
    forms
}

/// Value of a spelled-out quantity that implies a count.
pub fn number_word_value(word: &str) -> Option<u32> {
    let value = match word.to_ascii_lowercase().as_str() {
        "both" | "two" | "pair" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        _ => return None,
    };
    Some(value)
}

/// Lowercase with dashes and spaces removed, `"D-W7F0"` becomes `"dw7f0"`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
