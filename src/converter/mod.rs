//! External ABC converters.
//!
//! Rendering and transposing are delegated to command line tools that consume
//! a tune's raw text. The core only talks to them through [`TuneConverter`],
//! so it can be exercised without the tools installed.

use crate::book::tune::Tune;
use crate::AbcError;
use std::path::Path;

pub mod abc_tools;
pub mod converter_config;

pub trait TuneConverter {
    /// Render the first page of the tune as SVG at exactly `output`.
    fn render_svg(&self, tune: &Tune, output: &Path) -> Result<(), AbcError>;

    /// Render the tune as a MIDI file at `output`.
    fn render_midi(&self, tune: &Tune, output: &Path) -> Result<(), AbcError>;

    /// Return the tune's ABC text transposed by `semitones`.
    fn transpose(&self, tune: &Tune, semitones: i32) -> Result<String, AbcError>;
}
