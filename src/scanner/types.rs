//! Data model for scanned export declarations.
//!
//! These types carry the structural information extracted from one
//! `// LUA_EXPORT` annotation: enough to emit a wrapper, nothing more.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One exported declaration parsed from a header.
///
/// Class, namespace, and source path are frozen in from the scanner's
/// context when the declaration is recognized; they are never re-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Declared return type, as written
    pub return_type: String,

    /// Function name; doubles as the Lua export name
    pub name: String,

    /// Parameters in call order
    pub params: Vec<Param>,

    /// Enclosing class, if the declaration sits inside a class body
    pub class: Option<String>,

    /// Enclosing namespace, if any
    pub namespace: Option<String>,

    /// Header the declaration came from
    pub source: PathBuf,
}

impl FunctionSignature {
    /// Create a free-standing signature with the given name and return type.
    pub fn new(return_type: impl Into<String>, name: impl Into<String>) -> Self {
        FunctionSignature {
            return_type: return_type.into(),
            name: name.into(),
            params: Vec::new(),
            class: None,
            namespace: None,
            source: PathBuf::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Set the enclosing class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the enclosing namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.param_type, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} {}({})", self.return_type, self.name, params)
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter type, as written (defaults already stripped)
    pub param_type: String,

    /// Parameter name
    pub name: String,
}

impl Param {
    /// Create a new parameter.
    pub fn new(param_type: impl Into<String>, name: impl Into<String>) -> Self {
        Param {
            param_type: param_type.into(),
            name: name.into(),
        }
    }
}
