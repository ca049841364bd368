use crate::converter::TuneConverter;
use crate::parser::tune_parser::parse_tune;
use crate::parser::tunebook_parser::TUNE_START;
use crate::AbcError;
use std::collections::BTreeMap;
use std::fmt;

/// A single tune of a tunebook.
///
/// `raw_text` holds everything from the `X:` line up to the next tune and is
/// what gets written back to disk; the other attributes are derived from it.
/// Cloning yields a fully independent copy that can be modified without
/// touching the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tune {
    pub(crate) reference_number: Option<i64>,
    pub(crate) title: String,
    pub(crate) raw_text: String,
    pub(crate) fields: BTreeMap<char, Vec<String>>,
}

impl Tune {
    pub fn parse(abc: &str) -> Self {
        parse_tune(abc)
    }

    /// The `X:` value, `None` when it is not an integer.
    pub const fn reference_number(&self) -> Option<i64> {
        self.reference_number
    }

    /// First `T:` value, empty when the tune has no title.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub const fn fields(&self) -> &BTreeMap<char, Vec<String>> {
        &self.fields
    }

    /// All values of a header field in order of appearance.
    pub fn field(&self, code: char) -> Option<&[String]> {
        self.fields.get(&code).map(Vec::as_slice)
    }

    /// Replace the whole tune with the result of parsing `abc`.
    pub fn update_from_text(&mut self, abc: &str) {
        *self = parse_tune(abc);
    }

    /// Transpose by `semitones` through an external converter.
    pub fn transpose<C: TuneConverter + ?Sized>(
        &mut self,
        converter: &C,
        semitones: i32,
    ) -> Result<(), AbcError> {
        let transposed = converter.transpose(self, semitones)?;
        self.update_from_text(&transposed);
        Ok(())
    }

    /// Index of the first line holding the `X:` header.
    pub(crate) fn reference_line_index(&self) -> Option<usize> {
        self.raw_text
            .split('\n')
            .position(|line| line.trim().starts_with(TUNE_START))
    }
}

impl fmt::Display for Tune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct FakeConverter;

    impl TuneConverter for FakeConverter {
        fn render_svg(&self, _tune: &Tune, _output: &Path) -> Result<(), AbcError> {
            Ok(())
        }

        fn render_midi(&self, _tune: &Tune, _output: &Path) -> Result<(), AbcError> {
            Ok(())
        }

        fn transpose(&self, tune: &Tune, semitones: i32) -> Result<String, AbcError> {
            if semitones == 0 {
                return Err(AbcError::ExternalToolError("abc2abc: nothing to do".into()));
            }
            Ok(tune.raw_text().replace("K:G", "K:A"))
        }
    }

    #[test]
    fn test_update_from_text_replaces_everything() {
        let mut tune = Tune::parse("X:1\nT:Old\nC:Someone\nK:G");
        tune.update_from_text("X:9\nT:New\nK:D\n");
        assert_eq!(tune.reference_number(), Some(9));
        assert_eq!(tune.title(), "New");
        assert_eq!(tune.raw_text(), "X:9\nT:New\nK:D");
        assert!(tune.field('C').is_none());
        assert_eq!(tune, Tune::parse("X:9\nT:New\nK:D"));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Tune::parse("X:1\nT:Original\nK:G");
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.update_from_text("X:1\nT:Changed\nK:G");
        assert_eq!(original.title(), "Original");
        assert_eq!(copy.title(), "Changed");
    }

    #[test]
    fn test_transpose_with_converter() {
        let mut tune = Tune::parse("X:4\nT:Tune\nK:G\nGABc");
        tune.transpose(&FakeConverter, 2).unwrap();
        assert_eq!(tune.field('K').unwrap(), ["A"]);
        assert_eq!(tune.raw_text(), "X:4\nT:Tune\nK:A\nGABc");
    }

    #[test]
    fn test_transpose_failure_leaves_tune_untouched() {
        let mut tune = Tune::parse("X:4\nT:Tune\nK:G");
        let err = tune.transpose(&FakeConverter, 0).unwrap_err();
        assert!(matches!(err, AbcError::ExternalToolError(_)));
        assert_eq!(tune.field('K').unwrap(), ["G"]);
    }

    #[test]
    fn test_reference_line_index() {
        assert_eq!(Tune::parse("X:1\nT:A").reference_line_index(), Some(0));
        assert_eq!(Tune::parse("T:A\n  X:1").reference_line_index(), Some(1));
        assert_eq!(Tune::parse("T:A\nK:G").reference_line_index(), None);
        // header codes are case sensitive
        assert_eq!(Tune::parse("x:1\nT:A").reference_line_index(), None);
    }

    #[test]
    fn test_display_is_raw_text() {
        let tune = Tune::parse("\nX:1\nT:A\nK:G\n\n");
        assert_eq!(tune.to_string(), "X:1\nT:A\nK:G");
    }
}
