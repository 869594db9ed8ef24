use intel_morph::{number_word_value, singular_forms};
use intel_protocol::{ReferenceData, ShipType, TokenType};

use crate::candidate::Candidate;
use crate::config::ParserConfig;
use crate::matcher::MatchContext;
use crate::rules::count::{parse_count, quantity_at};
use crate::scanner::ScannedLine;

/// A ship name resolved over `len` words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipMatch {
    pub len: usize,
    pub ship: ShipType,
    pub is_plural: bool,
}

impl ShipMatch {
    fn implied_count(&self) -> u32 {
        if self.is_plural {
            2
        } else {
            1
        }
    }
}

fn lookup_plural(reference: &dyn ReferenceData, text: &str) -> Option<ShipType> {
    let (head, last) = match text.rsplit_once(' ') {
        Some((head, last)) => (Some(head), last),
        None => (None, text),
    };
    singular_forms(last).into_iter().find_map(|singular| {
        let candidate = match head {
            Some(head) => format!("{} {}", head, singular),
            None => singular,
        };
        reference.lookup_ship(&candidate)
    })
}

/// Ship names starting at every word, longest first.
pub fn ship_matches(
    line: &ScannedLine<'_>,
    reference: &dyn ReferenceData,
    config: &ParserConfig,
) -> Vec<Vec<ShipMatch>> {
    (0..line.len())
        .map(|start| {
            let longest = config.max_ship_words.min(line.len() - start);
            (1..=longest)
                .rev()
                .filter_map(|len| {
                    let text = line.window(start, start + len)?;
                    if let Some(ship) = reference.lookup_ship(&text) {
                        return Some(ShipMatch {
                            len,
                            ship,
                            is_plural: false,
                        });
                    }
                    lookup_plural(reference, &text).map(|ship| ShipMatch {
                        len,
                        ship,
                        is_plural: true,
                    })
                })
                .collect()
        })
        .collect()
}

fn ship(start: usize, len: usize, m: &ShipMatch, count: u32) -> Candidate {
    Candidate::new(
        start,
        len,
        TokenType::Ship {
            ship: m.ship.clone(),
            count,
            is_plural: m.is_plural,
        },
    )
}

pub fn ship_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    for m in ctx.ships_at(start) {
        out.push(ship(start, m.len, m, m.implied_count()));

        // raven x3
        let after = start + m.len;
        if after < ctx.line.len() && !ctx.line.closes(after - 1) {
            if let Some(quantity) = parse_count(ctx.line.core(after)).filter(|q| q.multiplier && q.value > 0) {
                out.push(ship(start, m.len + 1, m, quantity.value));
            }
        }
    }

    // 2x capsule, + 5 ravens, both capsules
    let mut prefixes: Vec<(u32, usize)> = quantity_at(ctx, start)
        .into_iter()
        .map(|(quantity, len)| (quantity.value, len))
        .collect();
    if let Some(value) = number_word_value(ctx.line.core(start)) {
        prefixes.push((value, 1));
    }
    for (value, len) in prefixes {
        if value == 0 || ctx.line.closes(start + len - 1) {
            continue;
        }
        for m in ctx.ships_at(start + len) {
            out.push(ship(start, len + m.len, m, value));
        }
    }
}
