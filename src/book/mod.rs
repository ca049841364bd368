pub mod renumber;
pub mod tune;
pub mod tunebook;
pub mod writer;
