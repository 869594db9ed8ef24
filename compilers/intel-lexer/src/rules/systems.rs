use intel_protocol::{ReferenceData, SolarSystem, TokenFlags, TokenType};

use crate::candidate::Candidate;
use crate::config::{MatchKinds, ParserConfig};
use crate::matcher::MatchContext;
use crate::rules::phrases::{gate_word, movement_verbs};
use crate::scanner::ScannedLine;

/// A solar system resolved over `len` words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemMatch {
    pub len: usize,
    pub system: SolarSystem,
    pub out_of_region: bool,
}

impl SystemMatch {
    fn flags(&self) -> TokenFlags {
        if self.out_of_region {
            TokenFlags::OUT_OF_REGION
        } else {
            TokenFlags::empty()
        }
    }
}

fn is_active_region(reference: &dyn ReferenceData, system: &SolarSystem, regions: &[String]) -> bool {
    regions.is_empty()
        || reference
            .region_of(system.id)
            .map_or(false, |region| regions.iter().any(|r| r.eq_ignore_ascii_case(&region.name)))
}

/// System names starting at every word, longest first.
///
/// Pasted links fall back to a lookup across all regions; such hits are
/// marked out of region.
pub fn system_matches(
    line: &ScannedLine<'_>,
    reference: &dyn ReferenceData,
    regions: &[String],
    config: &ParserConfig,
) -> Vec<Vec<SystemMatch>> {
    (0..line.len())
        .map(|start| {
            let longest = config.max_system_words.min(line.len() - start);
            (1..=longest)
                .rev()
                .filter_map(|len| {
                    let text = line.window(start, start + len)?;
                    if let Some(system) = reference.lookup_system(&text, regions) {
                        return Some(SystemMatch {
                            len,
                            system,
                            out_of_region: false,
                        });
                    }
                    if regions.is_empty() || !line.is_link(start, start + len) {
                        return None;
                    }
                    let system = reference.lookup_system(&text, &[])?;
                    let out_of_region = !is_active_region(reference, &system, regions);
                    Some(SystemMatch {
                        len,
                        system,
                        out_of_region,
                    })
                })
                .collect()
        })
        .collect()
}

/// Gate word following a system ending at `end`.
fn gate_after(ctx: &MatchContext<'_>, end: usize) -> Option<bool> {
    if end >= ctx.line.len() || ctx.line.closes(end - 1) {
        return None;
    }
    gate_word(ctx, end)
}

pub fn system_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    let gates = ctx.config.enables(MatchKinds::GATE);
    for m in ctx.systems_at(start) {
        if ctx.config.enables(MatchKinds::SYSTEM) {
            out.push(Candidate::new(start, m.len, TokenType::System(m.system.clone())).with_flags(m.flags()));
        }
        if let Some(is_ansiblex) = gate_after(ctx, start + m.len).filter(|_| gates) {
            out.push(
                Candidate::new(
                    start,
                    m.len + 1,
                    TokenType::Gate {
                        system: m.system.clone(),
                        is_ansiblex,
                    },
                )
                .with_flags(m.flags()),
            );
        }
    }
}

/// `jumped to Jita`, `heading into 1DQ1-A gate`
pub fn movement_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    for (verb, verb_len) in movement_verbs(ctx, start) {
        let target = start + verb_len;
        if ctx.line.closes(target - 1) {
            continue;
        }
        for m in ctx.systems_at(target) {
            let movement = |is_gate| TokenType::Movement {
                verb: verb.clone(),
                system: m.system.clone(),
                is_gate,
            };
            out.push(Candidate::new(start, verb_len + m.len, movement(false)).with_flags(m.flags()));
            if gate_after(ctx, target + m.len).is_some() {
                out.push(Candidate::new(start, verb_len + m.len + 1, movement(true)).with_flags(m.flags()));
            }
        }
    }
}
