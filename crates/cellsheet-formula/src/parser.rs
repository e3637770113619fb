//! Nom-based formula parser.
//!
//! Grammar: `"=" name "(" ref [":" ref] ")"` where `name` is looked up in the
//! function registry and each `ref` is an A1-style cell reference. Parsing is
//! total: malformed input yields a [`Formula`] carrying an error instead of
//! failing.

use nom::{
    character::complete::{alpha1, char, digit1, multispace0},
    combinator::{all_consuming, opt, recognize},
    sequence::{delimited, pair, preceded},
    IResult,
};

use cellsheet_core::{CellCoord, CellError, CellRange, Formula, Function, FORMULA_TRIGGER};

// =============================================================================
// Helper Combinators
// =============================================================================

/// Skip whitespace
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Recognize a cell reference such as `A1` or `AA12`
fn parse_cell_ref(input: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, digit1))(input)
}

/// Parse the argument list: `(A1:B2)` or `(A1)`
fn parse_range_args(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    delimited(
        ws(char('(')),
        pair(
            ws(parse_cell_ref),
            opt(preceded(char(':'), ws(parse_cell_ref))),
        ),
        ws(char(')')),
    )(input)
}

// =============================================================================
// Public API
// =============================================================================

/// Parse raw cell input beginning with the trigger character into a formula.
///
/// The range is normalized here, so `=sum(B2:A1)` covers the same cells as
/// `=sum(A1:B2)`; the original text stays in `source`.
pub fn parse_formula(input: &str) -> Formula {
    let body = input.strip_prefix(FORMULA_TRIGGER).unwrap_or(input);

    // Function name runs up to the first '('
    let split = body.find('(').unwrap_or(body.len());
    // Matched exactly: no case folding, no surrounding whitespace
    let (name, args) = body.split_at(split);

    let Some(function) = Function::from_name(name) else {
        tracing::warn!(input, name, "formula names an unknown function");
        return Formula::invalid(input, CellError::UnknownFunction(name.to_string()));
    };

    match parse_range(args) {
        Ok(range) => {
            tracing::debug!(input, %function, %range, "parsed formula");
            Formula::new(function, range, input)
        }
        Err(error) => {
            tracing::warn!(input, %error, "formula has a malformed range");
            Formula::invalid(input, error)
        }
    }
}

fn parse_range(args: &str) -> Result<CellRange, CellError> {
    let (_, (start, end)) = all_consuming(parse_range_args)(args)
        .map_err(|_| CellError::InvalidReference(args.trim().to_string()))?;

    let start = CellCoord::from_a1(start)?;
    let end = match end {
        Some(end) => CellCoord::from_a1(end)?,
        None => start,
    };

    Ok(CellRange::new(start, end))
}

// =============================================================================
// Tests
// =============================================================================
