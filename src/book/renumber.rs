use crate::book::tune::Tune;
use crate::parser::tune_parser::REFERENCE_NUMBER_FIELD;
use crate::parser::tunebook_parser::TUNE_START;
use crate::AbcError;

/// Give every tune the reference number matching its 1-based position.
///
/// The first `X:` line of each tune is rewritten in place, every other line
/// is left untouched. Fails without modifying anything if a tune has no `X:`
/// line at all.
pub fn renumber(tunes: &mut [Tune]) -> Result<(), AbcError> {
    let reference_lines = tunes
        .iter()
        .enumerate()
        .map(|(i, tune)| {
            tune.reference_line_index()
                .ok_or_else(|| missing_reference_line(i + 1, tune))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for ((tune, line_index), number) in tunes.iter_mut().zip(reference_lines).zip(1..) {
        tune.raw_text = rewrite_line(&tune.raw_text, line_index, number);
        tune.reference_number = Some(number);
        if let Some(first) = tune
            .fields
            .get_mut(&REFERENCE_NUMBER_FIELD)
            .and_then(|values| values.first_mut())
        {
            *first = number.to_string();
        }
    }
    log::debug!("Renumbered {} tunes", tunes.len());
    Ok(())
}

/// Check that a tune can take part in renumbering.
pub fn check_reference_line(position: usize, tune: &Tune) -> Result<(), AbcError> {
    match tune.reference_line_index() {
        Some(_) => Ok(()),
        None => Err(missing_reference_line(position, tune)),
    }
}

fn missing_reference_line(position: usize, tune: &Tune) -> AbcError {
    AbcError::StructuralIntegrityError(format!(
        "tune #{position} ({:?}) has no {TUNE_START} line",
        tune.title()
    ))
}

// keeps the `\r` of CRLF text
fn rewrite_line(text: &str, line_index: usize, number: i64) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i != line_index {
                line.to_string()
            } else if line.ends_with('\r') {
                format!("{TUNE_START}{number}\r")
            } else {
                format!("{TUNE_START}{number}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
