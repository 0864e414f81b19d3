//! YAML export of parsed resource documents.

mod writer;

pub use writer::generate_yaml;
