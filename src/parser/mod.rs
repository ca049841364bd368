pub mod encoding;
pub mod field_registry;
pub mod tune_parser;
pub mod tunebook_parser;
