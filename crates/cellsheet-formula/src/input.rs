use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

use cellsheet_core::{CellContent, FORMULA_TRIGGER};

use crate::parser::parse_formula;

/// Interpret raw text typed into a cell.
///
/// Input starting with the trigger character is a formula. Otherwise it is a
/// number if the trimmed text starts with one, with the first `,` read as a
/// decimal separator: `"12abc"` stores 12, as `parseFloat` would. Anything
/// else is kept verbatim as text.
pub fn parse_cell_input(input: &str) -> CellContent {
    if input.starts_with(FORMULA_TRIGGER) {
        return CellContent::Formula(parse_formula(input));
    }

    match parse_number(input) {
        Some(n) => CellContent::Number(n),
        None => CellContent::Text(input.to_string()),
    }
}

/// Longest leading decimal literal: sign, digits, fraction, exponent
fn float_prefix(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn parse_number(input: &str) -> Option<f64> {
    let normalized = input.trim().replacen(',', ".", 1);
    let (_, literal) = float_prefix(&normalized).ok()?;
    // Overflowing exponents give infinity; those stay text
    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}
