//! abcbook - ABC notation tunebook parser and writer
//!
//! This library provides:
//! - Loading of ABC tunebooks with encoding detection
//! - Header field extraction per tune, with the original text kept verbatim
//! - Sequential reference number repair on append/remove/write
//! - Rendering and transposing through external ABC tools
//!
//! # Example
//!
//! ```no_run
//! use abcbook::{Tune, Tunebook};
//!
//! let mut tunebook = Tunebook::load("session.abc").unwrap();
//! println!("{:?}", tunebook.titles());
//! tunebook.append(Tune::parse("X:1\nT:Drowsy Maggie\nK:Edor\n")).unwrap();
//! tunebook.write("session-new.abc").unwrap();
//! ```

pub mod book;
pub mod converter;
pub mod error;
pub mod parser;

// Re-export main types for convenience
pub use book::{tune::Tune, tunebook::Tunebook};
pub use converter::{abc_tools::AbcTools, converter_config::ConverterConfig, TuneConverter};
pub use error::AbcError;
pub use parser::{
    encoding::TextEncoding,
    field_registry::{field_name, INFORMATION_FIELDS},
    tune_parser::parse_tune,
};
