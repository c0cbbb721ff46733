//! Shared building blocks for the csslint crates: the character [`reader::Reader`] with its
//! [`reader::Location`] tracking, and the error types raised while parsing and validating.

pub mod errors;
pub mod reader;
