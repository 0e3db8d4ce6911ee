//! High-level operations invoked by the CLI.

pub mod generate;

pub use generate::{generate_bindings, scan_exports, GenerateOptions, GenerateReport};
