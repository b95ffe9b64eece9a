//! Error types raised by the demonstration sequences.
mod demo_errors;

pub use demo_errors::*;
