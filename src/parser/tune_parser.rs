use crate::book::tune::Tune;
use nom::character::complete::{anychar, char};
use nom::combinator::rest;
use nom::sequence::preceded;
use nom::IResult;
use nom::Parser;

pub const REFERENCE_NUMBER_FIELD: char = 'X';
pub const TITLE_FIELD: char = 'T';

/// Parse a header line `<code>:<value>` into its code and untrimmed value.
pub fn parse_field_line(i: &str) -> IResult<&str, (char, &str)> {
    (anychar, preceded(char(':'), rest)).parse(i)
}

/// Parse a reference number value, `None` when it is not an integer.
pub fn parse_reference_number(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}

/// Build a `Tune` out of a single tune block.
///
/// Never fails: text without any header line still yields a tune, possibly
/// without fields, title or reference number.
///
/// Every `X:` line updates the reference number, so the last one wins
/// (an unparseable later value clears it). Only the first non-empty `T:`
/// line becomes the title.
pub fn parse_tune(text: &str) -> Tune {
    let mut tune = Tune::default();
    tune.raw_text = text.trim().to_string();

    for line in text.split('\n') {
        let line = line.trim();
        let Ok((_, (code, value))) = parse_field_line(line) else {
            continue;
        };
        let value = value.trim();
        match code {
            REFERENCE_NUMBER_FIELD => {
                tune.reference_number = parse_reference_number(value);
                if tune.reference_number.is_none() {
                    log::debug!("Unparseable reference number {value:?}");
                }
            }
            TITLE_FIELD if tune.title.is_empty() => tune.title = value.to_string(),
            _ => {}
        }
        tune.fields.entry(code).or_default().push(value.to_string());
    }
    tune
}
