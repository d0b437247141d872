//! Diagnostic records emitted when the generator skips a malformed enum.
//!
//! This crate provides structured [`Diagnostic`] messages with a severity
//! and code, plus the [`DiagnosticSink`] that gathers them in declaration
//! order at the end of a generator run. Diagnostics are informational: they never abort a
//! run, and rendering them is left to the host.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
