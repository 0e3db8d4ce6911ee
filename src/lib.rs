//! Gangway - Lua binding generation for C++ script classes
//!
//! This crate provides the core library functionality for Gangway,
//! including header scanning, declaration parsing, marshalling
//! classification, and Lua wrapper emission.

pub mod codegen;
pub mod ops;
pub mod scanner;
pub mod util;

pub use codegen::{FunctionPlan, Marshal, PlanKind, ReturnKind};
pub use ops::{generate_bindings, GenerateOptions, GenerateReport};
pub use scanner::{FunctionSignature, Param, ParseError};
