use nom::{
    branch::alt,
    character::complete::{char, digit1, one_of, space0},
    combinator::{all_consuming, map, map_res, opt},
    sequence::{preceded, terminated, tuple},
    IResult,
};

use intel_protocol::TokenType;

use crate::candidate::Candidate;
use crate::matcher::MatchContext;

/// A numeric quantity as typed in chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity {
    pub value: u32,
    pub is_plus: bool,
    /// Written as `2x` or `x2`.
    pub multiplier: bool,
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

// x3
fn leading_multiplier(input: &str) -> IResult<&str, Quantity> {
    map(preceded(one_of("xX"), number), |value| Quantity {
        value,
        is_plus: false,
        multiplier: true,
    })(input)
}

// +5, + 5, 5, 2x
fn plain_quantity(input: &str) -> IResult<&str, Quantity> {
    map(
        tuple((
            opt(terminated(char('+'), space0)),
            number,
            opt(one_of("xX")),
        )),
        |(plus, value, times)| Quantity {
            value,
            is_plus: plus.is_some(),
            multiplier: times.is_some(),
        },
    )(input)
}

/// Parses a whole window as a quantity.
pub fn parse_count(text: &str) -> Option<Quantity> {
    all_consuming(alt((leading_multiplier, plain_quantity)))(text)
        .ok()
        .map(|(_, quantity)| quantity)
}

/// Quantity spelled over words `start..start + len` (`"+ 5"` takes two words).
pub fn quantity_at(ctx: &MatchContext<'_>, start: usize) -> Vec<(Quantity, usize)> {
    let mut found = Vec::new();
    if let Some(quantity) = parse_count(ctx.line.core(start)) {
        found.push((quantity, 1));
    }
    if ctx.line.core(start) == "+" {
        if let Some(quantity) = ctx.line.window(start, start + 2).as_deref().and_then(parse_count) {
            found.push((quantity, 2));
        }
    }
    found
}

pub fn count_candidates(ctx: &MatchContext<'_>, start: usize, out: &mut Vec<Candidate>) {
    for (quantity, len) in quantity_at(ctx, start) {
        out.push(Candidate::new(
            start,
            len,
            TokenType::Count {
                value: quantity.value,
                is_plus: quantity.is_plus,
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantity(value: u32, is_plus: bool, multiplier: bool) -> Option<Quantity> {
        Some(Quantity {
            value,
            is_plus,
            multiplier,
        })
    }

    #[test]
    fn test_parse_count_forms() {
        assert_eq!(parse_count("5"), quantity(5, false, false));
        assert_eq!(parse_count("+5"), quantity(5, true, false));
        assert_eq!(parse_count("+ 12"), quantity(12, true, false));
        assert_eq!(parse_count("2x"), quantity(2, false, true));
        assert_eq!(parse_count("X3"), quantity(3, false, true));
    }

    #[test]
    fn test_parse_count_rejects_words() {
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("x"), None);
        assert_eq!(parse_count("5km"), None);
        assert_eq!(parse_count("2x2"), None);
        assert_eq!(parse_count("99999999999"), None);
    }
}
