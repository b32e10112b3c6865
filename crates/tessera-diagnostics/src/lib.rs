//! Tessera diagnostics
//!
//! Stable error codes shared by the value core and its tools. Every error
//! raised by `tessera-types` maps to exactly one code here.

mod error_code;

pub use error_code::*;
