//! Parse error types for export declarations.

use miette::Diagnostic;
use thiserror::Error;

/// Error parsing one annotated declaration.
///
/// Always recovered: the scanner logs the offending declaration, skips it,
/// and continues with the next line. No parse failure ever aborts a file
/// or the run.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The declaration text does not match the expected signature shape.
    #[error("invalid function signature: `{text}`")]
    #[diagnostic(
        code(gangway::scan::invalid_signature),
        help("only `Type Name(params);` declarations can follow a LUA_EXPORT marker")
    )]
    Signature { text: String },

    /// One parameter substring does not match `type name [= default]`.
    /// This fails the whole declaration rather than shrinking its arity.
    #[error("could not parse parameter `{text}` of `{function}`")]
    #[diagnostic(
        code(gangway::scan::invalid_parameter),
        help("write each parameter as `type name`, optionally with a default value")
    )]
    Parameter { function: String, text: String },
}
