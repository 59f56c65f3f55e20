//! Error types and diagnostic collection for the compiler.
//!
//! This module defines the diagnostics raised by every stage of the front
//! end. It includes:
//!
//! - Error structures bound to a source position
//! - Specific error variants for lexing, validation and scope resolution
//! - The warning/error severity split
//! - A collector that gathers diagnostics across a whole compilation run

pub mod diagnostics;
pub mod errors;
