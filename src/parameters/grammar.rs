//! Line grammar for parameter files
//!
//! Every line is normalised first: text from `#` to the end of the line is a
//! comment, tabs count as spaces, and space runs collapse to one. What is left
//! follows one of two forms, with fields separated by single spaces:
//!
//! - `CATEGORY TYPE NAME [VALUE]` when the first field is a [`Category`].
//!   `VALUE` is the rest of the line and may contain spaces.
//! - `NAME VALUE` otherwise. Both fields are required.
//!
//! A line starting with `RUNNER` and holding at most one more field is read in
//! the second form, so that a parameter may itself be named `RUNNER`.

use crate::parameters::parameter::Category;
use nom::{
    bytes::complete::take_till1,
    character::complete::char,
    combinator::{opt, rest},
    sequence::{pair, preceded},
    IResult, Parser,
};
use thiserror::Error;

/// Errors raised while parsing a single line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    #[error("Parameter {name} has no value")]
    MissingValue { name: String },

    #[error("Category, type and name are required: \"{line}\"")]
    IncompleteDefinition { line: String },

    #[error("Could not parse this line: \"{line}\"")]
    Malformed { line: String },
}

/// A `CATEGORY TYPE NAME [VALUE]` line
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub category: Category,
    pub type_str: String,
    pub name: String,
    pub value: Option<String>,
}

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Blank or comment-only line
    Empty,
    /// Full definition of a parameter
    Definition(Definition),
    /// `NAME VALUE` line
    Assignment { name: String, value: String },
}

/// Strip comments, turn tabs into spaces, trim and collapse space runs.
///
/// ```
/// use optparams_rs::parameters::grammar::normalize_line;
///
/// assert_eq!(normalize_line("  ALGO\tint  SEED 3   # seed"), "ALGO int SEED 3");
/// assert_eq!(normalize_line("# only a comment"), "");
/// ```
pub fn normalize_line(raw: &str) -> String {
    let content = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    content
        .split([' ', '\t', '\r', '\n'])
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse one raw line.
///
/// # Examples
///
/// ```
/// use optparams_rs::parameters::grammar::{parse_line, ParsedLine};
/// use optparams_rs::parameters::Category;
///
/// match parse_line("ALGO NOMAD::Double DISPLAY_DEGREE 2").unwrap() {
///     ParsedLine::Definition(def) => {
///         assert_eq!(def.category, Category::Algo);
///         assert_eq!(def.type_str, "NOMAD::Double");
///         assert_eq!(def.name, "DISPLAY_DEGREE");
///         assert_eq!(def.value.as_deref(), Some("2"));
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn parse_line(raw: &str) -> Result<ParsedLine, GrammarError> {
    let line = normalize_line(raw);
    if line.is_empty() {
        return Ok(ParsedLine::Empty);
    }

    let (first, remainder) = split_field(&line)?;
    match first.parse::<Category>() {
        Ok(category) if !is_runner_assignment(first, remainder) => {
            parse_definition(&line, category, remainder)
        }
        _ => parse_assignment(first, remainder),
    }
}

fn parse_definition(
    line: &str,
    category: Category,
    remainder: Option<&str>,
) -> Result<ParsedLine, GrammarError> {
    let incomplete = || GrammarError::IncompleteDefinition {
        line: line.to_string(),
    };

    let (type_str, remainder) = split_field(remainder.ok_or_else(incomplete)?)?;
    let (name, value) = split_field(remainder.ok_or_else(incomplete)?)?;

    Ok(ParsedLine::Definition(Definition {
        category,
        type_str: type_str.to_string(),
        name: name.to_string(),
        value: value.map(str::to_string),
    }))
}

fn parse_assignment(name: &str, value: Option<&str>) -> Result<ParsedLine, GrammarError> {
    match value {
        Some(value) => Ok(ParsedLine::Assignment {
            name: name.to_string(),
            value: value.to_string(),
        }),
        None => Err(GrammarError::MissingValue {
            name: name.to_string(),
        }),
    }
}

fn is_runner_assignment(first: &str, remainder: Option<&str>) -> bool {
    first == Category::Runner.to_string() && remainder.map_or(true, |r| !r.contains(' '))
}

/// First field, and whatever follows the next single space
fn field_and_rest(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(
        take_till1(|c: char| c == ' '),
        opt(preceded(char(' '), rest)),
    )
    .parse(input)
}

fn split_field(input: &str) -> Result<(&str, Option<&str>), GrammarError> {
    match field_and_rest(input) {
        Ok((_, (field, rest))) => Ok((field, rest.filter(|r| !r.is_empty()))),
        Err(_) => Err(GrammarError::Malformed {
            line: input.to_string(),
        }),
    }
}
